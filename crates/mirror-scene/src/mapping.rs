use {mirror_base::Vec3, mirror_infer::Landmark};

/// World units spanned by the full normalized image range.
pub const SCENE_SCALE: f32 = 10.0;

pub const BONE_COLOR: u32 = 0xffffff;
pub const BONE_OPACITY: f32 = 0.9;
pub const JOINT_EMISSIVE_INTENSITY: f32 = 0.3;

/// Normalized landmark to scene coordinates: centred on the origin, y up.
pub fn to_scene(landmark: &Landmark) -> Vec3<f32> {
    Vec3::new(
        (landmark.x - 0.5) * SCENE_SCALE,
        (0.5 - landmark.y) * SCENE_SCALE,
        (landmark.z - 0.5) * SCENE_SCALE,
    )
}

pub fn joint_radius(index: usize) -> f32 {
    match index {
        // shoulders, hips
        11 | 12 | 23 | 24 => 0.18,
        // elbows, knees
        13 | 14 | 25 | 26 => 0.15,
        _ => 0.12,
    }
}

/// Colour by body region: face, shoulders, hips, legs, arms, anything else.
pub fn joint_color(index: usize) -> u32 {
    match index {
        0..=10 => 0xff3333,
        11 | 12 => 0x00ffff,
        23 | 24 => 0x3366ff,
        25..=32 => 0xff9900,
        15..=22 => 0xff66ff,
        _ => 0x00ff00,
    }
}

pub fn joint_opacity(visibility: f32) -> f32 {
    0.9 + visibility * 0.1
}
