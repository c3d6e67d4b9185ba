//! Orbit-style camera controls with optional damping.
//!
//! Input handlers only accumulate deltas (`rotate`, `pan`, `dolly`); the
//! camera moves when `update` runs, once per played frame. With damping on,
//! every update applies `damping_factor` of the pending motion and keeps the
//! rest, so motion eases out over the following frames.

use crate::camera::PerspectiveCamera;
use crate::constants::*;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SphericalDelta {
    theta: f32,
    phi: f32,
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    delta: SphericalDelta,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: CONTROLS_ROTATE_SPEED,
            zoom_speed: CONTROLS_ZOOM_SPEED,
            pan_speed: CONTROLS_PAN_SPEED,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta: SphericalDelta::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Drag by `(dx, dy)` pixels on a surface `client_height` pixels tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, client_height: f32) {
        let h = client_height.max(1.0);
        self.delta.theta -= TAU * dx / h * self.rotate_speed;
        self.delta.phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Pan so the point under the cursor follows a drag of `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32, client_height: f32, camera: &PerspectiveCamera) {
        let h = client_height.max(1.0);
        let distance = (camera.position - self.target).length();
        let half_fov = (camera.fovy_degrees.to_radians() * 0.5).tan();
        let world_per_px = 2.0 * distance * half_fov / h * self.pan_speed;
        let (right, up) = camera.basis();
        self.pan_offset += -right * dx * world_per_px + up * dy * world_per_px;
    }

    /// Wheel input; positive `delta_y` moves away from the target.
    pub fn dolly(&mut self, delta_y: f32) {
        if delta_y == 0.0 {
            return;
        }
        let zoom_scale = 0.95_f32.powf(self.zoom_speed * (delta_y * 0.01).abs());
        if delta_y < 0.0 {
            self.scale *= zoom_scale;
        } else {
            self.scale /= zoom_scale;
        }
    }

    /// Motion queued but not yet applied to the camera.
    pub fn has_pending_motion(&self) -> bool {
        self.delta.theta.abs() > EPS
            || self.delta.phi.abs() > EPS
            || self.pan_offset.length_squared() > EPS * EPS
            || (self.scale - 1.0).abs() > EPS
    }

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        theta += self.delta.theta * factor;
        phi += self.delta.phi * factor;
        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        let previous = camera.position;
        camera.position = self.target + new_offset;
        camera.target = self.target;

        if self.enable_damping {
            self.delta.theta *= 1.0 - self.damping_factor;
            self.delta.phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta = SphericalDelta::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        (camera.position - previous).length_squared() > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn update_without_input_keeps_camera() {
        let mut cam = PerspectiveCamera::new(1.0);
        let start = cam.position;
        let mut controls = OrbitControls::new(Vec3::ZERO);
        assert!(!controls.update(&mut cam));
        assert_relative_eq!(cam.position.distance(start), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn rotation_preserves_distance() {
        let mut cam = PerspectiveCamera::new(1.0);
        let r0 = cam.position.length();
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.rotate(120.0, 0.0, 600.0);
        assert!(controls.update(&mut cam));
        assert_relative_eq!(cam.position.length(), r0, epsilon = 1e-4);
    }
}
