use glam::{Mat4, Vec3};

/// View camera: mutable position, yaw/pitch orientation, cached forward.
///
/// Consumed by the frame loop, never owned by it conceptually: the driver
/// calls [`Camera::update`] once per tick and may overwrite `position` in
/// follow mode, but derives nothing else from it.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    forward: Vec3,
}

impl Camera {
    /// Camera at `position`, oriented back toward the origin region.
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: (-125.0f32).to_radians(),
            pitch: (-10.0f32).to_radians(),
            fov: 60.0f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            forward: Vec3::NEG_Z,
        };
        camera.update();
        camera
    }

    /// Recompute the cached forward direction from yaw and pitch.
    /// Called once per tick by the driver.
    pub fn update(&mut self) {
        self.forward = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize();
    }

    /// The forward direction as of the last `update`.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(13.0, 3.0, 9.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn forward_is_unit_length() {
        let camera = Camera::default();
        assert_relative_eq!(camera.forward().length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn update_tracks_orientation_changes() {
        let mut camera = Camera::default();
        let before = camera.forward();
        camera.yaw += 1.0;
        // Forward is cached until the next update.
        assert_eq!(camera.forward(), before);
        camera.update();
        assert_ne!(camera.forward(), before);
    }

    #[test]
    fn view_matrix_is_finite() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        assert!(!view.col(0).x.is_nan());
        let projection = camera.projection_matrix(16.0 / 9.0);
        assert!(!projection.col(0).x.is_nan());
    }

    #[test]
    fn position_is_externally_writable() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
