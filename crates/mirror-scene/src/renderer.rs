use crate::*;

pub const BACKGROUND_COLOR: u32 = 0x2a2a2a;

/// Software rasteriser for a `Skeleton`.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub background: u32,
    pub lights: Lights,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR,
            lights: Lights::default(),
        }
    }
}

impl Renderer {
    /// Draw bones first, then joints from far to near so nearer spheres
    /// cover the ones behind them.
    pub fn render(&self, skeleton: &Skeleton, camera: &OrbitCamera, target: &mut Framebuffer) {
        target.clear(self.background);

        for bone in &skeleton.bones {
            let (Some(a), Some(b)) = (camera.project(bone.start), camera.project(bone.end)) else {
                continue;
            };
            target.draw_line(
                (a.x.round() as i32, a.y.round() as i32),
                (b.x.round() as i32, b.y.round() as i32),
                bone.color,
                bone.opacity,
            );
        }

        let mut visible: Vec<_> = skeleton
            .joints
            .iter()
            .filter_map(|joint| camera.project(joint.position).map(|p| (joint, p)))
            .collect();
        visible.sort_by(|(_, a), (_, b)| b.depth.total_cmp(&a.depth));

        let (right, up, forward) = camera.basis();
        for (joint, projected) in visible {
            target.fill_disc(
                (projected.x, projected.y),
                joint.radius * projected.scale,
                joint.opacity,
                |u, v| {
                    // sphere normal under this pixel, back in world space
                    let out = (1.0 - u * u - v * v).max(0.0).sqrt();
                    let normal = right * u - up * v - forward * out;
                    let surface = joint.position + normal * joint.radius;
                    self.lights
                        .shade(joint.color, JOINT_EMISSIVE_INTENSITY, surface, normal)
                },
            );
        }
    }
}
