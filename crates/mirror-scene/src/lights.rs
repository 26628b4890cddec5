use mirror_base::Vec3;

/// Packed `0xRRGGBB` to linear-ish [0, 1] channels.
pub fn unpack_rgb(color: u32) -> Vec3<f32> {
    Vec3::new(
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        (color & 0xff) as f32 / 255.0,
    )
}

pub fn pack_rgb(color: Vec3<f32>) -> u32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    channel(color.x) << 16 | channel(color.y) << 8 | channel(color.z)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f32,
    /// Light shines from here toward the origin.
    pub position: Vec3<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3<f32>,
    /// Light fades linearly to nothing at this distance.
    pub range: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lights {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub directional: Vec<DirectionalLight>,
    pub point: Vec<PointLight>,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient_color: 0x606060,
            ambient_intensity: 1.2,
            directional: vec![
                // key
                DirectionalLight {
                    color: 0xffffff,
                    intensity: 1.2,
                    position: Vec3::new(5.0, 10.0, 7.0),
                },
                // fill
                DirectionalLight {
                    color: 0x7777ff,
                    intensity: 0.7,
                    position: Vec3::new(-5.0, -5.0, -5.0),
                },
            ],
            point: vec![PointLight {
                color: 0x4ecdc4,
                intensity: 1.0,
                position: Vec3::new(0.0, 3.0, 3.0),
                range: 100.0,
            }],
        }
    }
}

impl Lights {
    /// Lambert shading of a surface point with an emissive term.
    pub fn shade(
        &self,
        base: u32,
        emissive_intensity: f32,
        position: Vec3<f32>,
        normal: Vec3<f32>,
    ) -> u32 {
        let albedo = unpack_rgb(base);
        let mut light = unpack_rgb(self.ambient_color) * self.ambient_intensity;

        for dir in &self.directional {
            let lambert = normal.dot(dir.position.normalized()).max(0.0);
            light += unpack_rgb(dir.color) * (dir.intensity * lambert);
        }

        for point in &self.point {
            let to_light = point.position - position;
            let distance = to_light.length();
            if distance >= point.range || distance == 0.0 {
                continue;
            }
            let falloff = 1.0 - distance / point.range;
            let lambert = normal.dot(to_light / distance).max(0.0);
            light += unpack_rgb(point.color) * (point.intensity * lambert * falloff);
        }

        let lit = Vec3::new(
            albedo.x * light.x,
            albedo.y * light.y,
            albedo.z * light.z,
        ) + albedo * emissive_intensity;
        pack_rgb(lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_roundtrip() {
        assert_eq!(pack_rgb(unpack_rgb(0x4ecdc4)), 0x4ecdc4);
    }

    #[test]
    fn test_key_light_side_is_brighter() {
        let lights = Lights::default();
        let toward_key = Vec3::new(5.0, 10.0, 7.0).normalized();
        let lit = lights.shade(0x808080, 0.0, toward_key, toward_key);
        let shadow = lights.shade(0x808080, 0.0, -toward_key, -toward_key);
        assert!(unpack_rgb(lit).x > unpack_rgb(shadow).x);
    }

    #[test]
    fn test_black_surface_stays_black() {
        let lights = Lights::default();
        assert_eq!(lights.shade(0x000000, 0.3, Vec3::zero(), Vec3::new(0.0, 0.0, 1.0)), 0);
    }
}
