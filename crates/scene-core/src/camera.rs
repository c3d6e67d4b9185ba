//! Right-handed perspective camera.
//!
//! Depth maps to `[0, 1]` (the WebGPU clip convention), so matrices from here
//! can be uploaded unchanged.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_POSITION};
use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        let mut cam = Self {
            position: Vec3::from_array(CAMERA_POSITION),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_degrees: CAMERA_FOV_DEG,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Recompute the cached projection after changing fov, aspect or planes.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fovy_degrees.to_radians(),
            self.aspect.max(f32::EPSILON),
            self.znear,
            self.zfar,
        );
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Unit vector from the eye towards the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Screen-right and screen-up basis vectors in world space.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let fwd = self.forward();
        let right = fwd.cross(self.up).normalize_or_zero();
        let up = right.cross(fwd);
        (right, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aspect_change_refreshes_projection() {
        let mut cam = PerspectiveCamera::new(1.0);
        let before = cam.projection_matrix();
        cam.set_aspect(2.0);
        let after = cam.projection_matrix();
        // x scale halves when the aspect doubles
        assert_relative_eq!(after.x_axis.x * 2.0, before.x_axis.x, epsilon = 1e-5);
        assert_relative_eq!(after.y_axis.y, before.y_axis.y, epsilon = 1e-5);
    }

    #[test]
    fn basis_is_orthonormal() {
        let cam = PerspectiveCamera::new(1.5);
        let (right, up) = cam.basis();
        assert_relative_eq!(right.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(up.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(right.dot(up), 0.0, epsilon = 1e-5);
        assert_relative_eq!(right.dot(cam.forward()), 0.0, epsilon = 1e-5);
    }
}
