use {
    crate::*,
    mirror_base::Vec3,
    mirror_infer::{PoseData, VISIBILITY_THRESHOLD},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub index: usize,
    pub position: Vec3<f32>,
    pub radius: f32,
    pub color: u32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub from: usize,
    pub to: usize,
    pub start: Vec3<f32>,
    pub end: Vec3<f32>,
    pub color: u32,
    pub opacity: f32,
}

/// Scene objects for one pose: a sphere per visible landmark, a line per
/// connection between two visible landmarks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    pub joints: Vec<Joint>,
    pub bones: Vec<Bone>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Throw away every object and build the scene for `pose` from scratch.
    pub fn rebuild(&mut self, pose: &PoseData) {
        self.clear();
        let landmarks = &pose.landmarks;
        if landmarks.is_empty() {
            return;
        }

        // styling follows the position in the list
        for (index, landmark) in landmarks.iter().enumerate() {
            if landmark.visibility < VISIBILITY_THRESHOLD {
                continue;
            }
            self.joints.push(Joint {
                index,
                position: to_scene(landmark),
                radius: joint_radius(index),
                color: joint_color(index),
                opacity: joint_opacity(landmark.visibility),
            });
        }

        for &[from, to] in &pose.connections {
            let (Some(a), Some(b)) = (landmarks.get(from), landmarks.get(to)) else {
                continue;
            };
            if a.visibility < VISIBILITY_THRESHOLD || b.visibility < VISIBILITY_THRESHOLD {
                continue;
            }
            self.bones.push(Bone {
                from,
                to,
                start: to_scene(a),
                end: to_scene(b),
                color: BONE_COLOR,
                opacity: BONE_OPACITY,
            });
        }

        log::trace!(
            "Skeleton rebuilt: {} joints, {} bones",
            self.joints.len(),
            self.bones.len()
        );
    }

    pub fn clear(&mut self) {
        self.joints.clear();
        self.bones.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty() && self.bones.is_empty()
    }
}
