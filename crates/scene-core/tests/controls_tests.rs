// Host-side tests for orbit controls, plane geometry and frame stats.

use approx::assert_relative_eq;
use glam::Vec3;
use scene_core::*;
use std::f32::consts::PI;

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::new(1.0)
}

#[test]
fn damped_rotation_eases_out_and_converges() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(Vec3::ZERO);
    controls.enable_damping = true;
    controls.damping_factor = 0.1;
    controls.rotate(300.0, 0.0, 600.0);

    let mut steps = Vec::new();
    for _ in 0..200 {
        let before = cam.position;
        controls.update(&mut cam);
        steps.push(cam.position.distance(before));
    }
    assert!(steps[0] > steps[1], "motion should decay");
    assert!(steps[1] > steps[10]);
    assert!(*steps.last().unwrap() < 1e-4);
    assert!(!controls.has_pending_motion());
}

#[test]
fn undamped_rotation_applies_at_once() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(Vec3::ZERO);
    controls.rotate(150.0, 0.0, 600.0);
    assert!(controls.update(&mut cam));
    assert!(!controls.has_pending_motion());
    assert!(!controls.update(&mut cam));
}

#[test]
fn polar_angle_stays_clamped() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(Vec3::ZERO);
    // Drag far past the pole
    controls.rotate(0.0, -5000.0, 600.0);
    controls.update(&mut cam);
    let offset = cam.position - controls.target;
    let phi = (offset.y / offset.length()).acos();
    assert!(phi > 0.0 && phi <= PI);
    // Pinned just short of the lower pole rather than flipping over it
    assert!(offset.y < 0.0);
    assert!((offset.x * offset.x + offset.z * offset.z).sqrt() < 1e-3);
    assert!(cam.position.is_finite());
}

#[test]
fn dolly_respects_distance_limits() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(Vec3::ZERO);
    controls.min_distance = 2.0;
    controls.max_distance = 6.0;
    for _ in 0..100 {
        controls.dolly(-500.0);
        controls.update(&mut cam);
    }
    assert_relative_eq!(cam.position.length(), 2.0, epsilon = 1e-3);
    for _ in 0..100 {
        controls.dolly(500.0);
        controls.update(&mut cam);
    }
    assert_relative_eq!(cam.position.length(), 6.0, epsilon = 1e-3);
}

#[test]
fn wheel_direction_matches_dolly_direction() {
    let mut cam = camera();
    let r0 = cam.position.length();
    let mut controls = OrbitControls::new(Vec3::ZERO);
    controls.dolly(-100.0);
    controls.update(&mut cam);
    assert!(cam.position.length() < r0);
}

#[test]
fn pan_moves_target_and_camera_together() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(Vec3::ZERO);
    let offset_before = cam.position - controls.target;
    controls.pan(40.0, 0.0, 600.0, &cam);
    controls.update(&mut cam);
    assert!(controls.target.length() > 0.0);
    let offset_after = cam.position - controls.target;
    assert_relative_eq!(offset_before.length(), offset_after.length(), epsilon = 1e-4);
    assert_eq!(cam.target, controls.target);
}

#[test]
fn plane_geometry_counts_and_extent() {
    let plane = PlaneGeometry::new(5.0, 5.0, 4, 2).unwrap();
    assert_eq!(plane.vertices.len(), 5 * 3);
    assert_eq!(plane.indices.len(), 6 * 4 * 2);
    assert_eq!(plane.index_count(), 48);
    let max_index = *plane.indices.iter().max().unwrap() as usize;
    assert!(max_index < plane.vertices.len());

    let first = plane.vertices.first().unwrap();
    let last = plane.vertices.last().unwrap();
    assert_eq!(first.position, [-2.5, 2.5, 0.0]);
    assert_eq!(first.uv, [0.0, 1.0]);
    assert_eq!(last.position, [2.5, -2.5, 0.0]);
    assert_eq!(last.uv, [1.0, 0.0]);
}

#[test]
fn plane_rejects_zero_segments() {
    assert_eq!(
        PlaneGeometry::new(1.0, 1.0, 0, 3).unwrap_err(),
        SceneError::InvalidGeometry
    );
}

#[test]
fn mesh_lies_flat_and_lifted() {
    let m = geometry::mesh_model_matrix();
    // Plane normal (+Z) ends up pointing up
    let n = m.transform_vector3(Vec3::Z);
    assert_relative_eq!(n.y, 1.0, epsilon = 1e-5);
    let origin = m.transform_point3(Vec3::ZERO);
    assert_relative_eq!(origin.y, 0.2, epsilon = 1e-6);
}

#[test]
fn stats_wait_for_a_full_window() {
    let mut stats = FrameStats::new(0.0);
    for i in 1..30 {
        assert!(stats.update(i as f64 * 16.0).is_none());
    }
    let sample = stats.update(1000.0).unwrap();
    assert_relative_eq!(sample.fps, 30.0, epsilon = 1e-3);
    assert_eq!(stats.pending_frames(), 0);
    assert_eq!(sample.label(), "30 FPS (30-30)");
}

#[test]
fn stats_track_min_and_max() {
    let mut stats = FrameStats::new(0.0);
    for i in 1..=60 {
        stats.update(i as f64 * 1000.0 / 60.0);
    }
    for i in 1..=40 {
        stats.update(1000.0 + i as f64 * 50.0);
    }
    let last = stats.last().unwrap();
    assert!(last.min < 25.0);
    assert!(last.max > 55.0);
}
