use {mirror_base::Vec3, std::f32::consts::PI};

const UP: Vec3<f32> = Vec3::new(0.0, 1.0, 0.0);

/// A point after projection to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Distance along the view direction.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// Perspective camera orbiting the origin, with the limits and damping of
/// an orbit control: user input accumulates deltas, `update` eases them in.
///
/// Azimuth is measured around +y from +z toward +x, polar from +y.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    fov_y: f32,
    near: f32,
    far: f32,
    viewport: (usize, usize),
    target: Vec3<f32>,
    azimuth: f32,
    polar: f32,
    distance: f32,
    azimuth_delta: f32,
    polar_delta: f32,
    dolly_scale: f32,
    pub damping_factor: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Camera at (0, 0, 5) looking at the origin.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            fov_y: 60f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            viewport: (width.max(1), height.max(1)),
            target: Vec3::zero(),
            azimuth: 0.0,
            polar: PI / 2.0,
            distance: 5.0,
            azimuth_delta: 0.0,
            polar_delta: 0.0,
            dolly_scale: 1.0,
            damping_factor: 0.05,
            min_azimuth: -PI / 6.0,
            max_azimuth: PI / 6.0,
            min_polar: PI / 2.0 - PI / 6.0,
            max_polar: PI / 2.0 + PI / 6.0,
            min_distance: 4.0,
            max_distance: 6.0,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport = (width.max(1), height.max(1));
    }

    pub fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Queue a rotation in radians. Positive azimuth swings the camera
    /// toward +x, positive polar swings it down.
    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        self.azimuth_delta += d_azimuth;
        self.polar_delta += d_polar;
    }

    /// Queue a distance change: `scale` > 1 moves away, < 1 moves closer.
    pub fn dolly(&mut self, scale: f32) {
        if scale > 0.0 {
            self.dolly_scale *= scale;
        }
    }

    /// Apply a damped share of the pending rotation and all pending dolly,
    /// then clamp to the limits. Call once per rendered frame.
    pub fn update(&mut self) {
        self.azimuth = (self.azimuth + self.azimuth_delta * self.damping_factor)
            .clamp(self.min_azimuth, self.max_azimuth);
        self.polar = (self.polar + self.polar_delta * self.damping_factor)
            .clamp(self.min_polar, self.max_polar);
        self.distance =
            (self.distance * self.dolly_scale).clamp(self.min_distance, self.max_distance);

        self.azimuth_delta *= 1.0 - self.damping_factor;
        self.polar_delta *= 1.0 - self.damping_factor;
        self.dolly_scale = 1.0;
    }

    pub fn position(&self) -> Vec3<f32> {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target
            + Vec3::new(
                sin_polar * sin_az,
                cos_polar,
                sin_polar * cos_az,
            ) * self.distance
    }

    /// Unit vectors (right, up, forward) of the camera frame.
    pub fn basis(&self) -> (Vec3<f32>, Vec3<f32>, Vec3<f32>) {
        let forward = (self.target - self.position()).normalized();
        let right = forward.cross(UP).normalized();
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// Project a world point to viewport pixels. `None` outside the near/far
    /// range, which includes everything behind the camera.
    pub fn project(&self, point: Vec3<f32>) -> Option<Projected> {
        let (right, up, forward) = self.basis();
        let rel = point - self.position();
        let depth = rel.dot(forward);
        if depth < self.near || depth > self.far {
            return None;
        }

        let focal = 1.0 / (self.fov_y / 2.0).tan();
        let ndc_x = rel.dot(right) * focal / (self.aspect() * depth);
        let ndc_y = rel.dot(up) * focal / depth;
        let (width, height) = (self.viewport.0 as f32, self.viewport.1 as f32);

        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * width,
            y: (1.0 - ndc_y) * 0.5 * height,
            depth,
            scale: focal * height * 0.5 / depth,
        })
    }
}
