// Host-side tests for the scene controller contract: resize, play/stop,
// control bindings and the frame step.

use approx::assert_relative_eq;
use scene_core::*;

fn make_scene() -> SceneState {
    let viewport = Viewport::new(800, 600, 1.0).unwrap();
    SceneState::new(viewport, &SceneOptions::default(), 0.0).unwrap()
}

fn running_scene() -> SceneState {
    let mut scene = make_scene();
    assert_eq!(scene.play(), LoopCommand::Schedule);
    scene
}

#[test]
fn construction_uses_container_aspect_and_defaults() {
    let scene = make_scene();
    assert_relative_eq!(scene.camera.aspect, 800.0 / 600.0);
    assert_eq!(scene.camera.fovy_degrees, 33.0);
    assert_relative_eq!(scene.camera.position.x, 2.6, epsilon = 1e-4);
    assert_relative_eq!(scene.camera.position.y, 1.4, epsilon = 1e-4);
    assert_relative_eq!(scene.camera.position.z, 2.9, epsilon = 1e-4);
    assert!(scene.controls.enable_damping);
    assert_relative_eq!(scene.controls.damping_factor, 0.1);
    assert!(!scene.post.enabled);
    assert_eq!(scene.post.bloom, BloomSettings::default());
    assert_eq!(scene.uniforms.time, 0.0);
}

#[test]
fn resize_updates_viewport_post_target_and_aspect() {
    let mut scene = make_scene();
    let vp = scene.resize(1280, 400, 1.0).unwrap();
    assert_eq!((vp.width, vp.height), (1280, 400));
    assert_eq!(scene.viewport, vp);
    assert_eq!(scene.post.target, vp);
    assert_eq!(scene.post.target.backing_size(), (1280, 400));
    assert_relative_eq!(scene.camera.aspect, 1280.0 / 400.0);
}

#[test]
fn resize_scales_backing_store_by_pixel_ratio() {
    let mut scene = make_scene();
    scene.resize(300, 200, 2.0).unwrap();
    assert_eq!(scene.post.target.backing_size(), (600, 400));
    assert_eq!(scene.post.bloom_size(), (300, 200));
    assert_relative_eq!(scene.camera.aspect, 1.5);
}

#[test]
fn zero_sized_resize_keeps_previous_size() {
    let mut scene = make_scene();
    let err = scene.resize(0, 300, 1.0).unwrap_err();
    assert_eq!(
        err,
        SceneError::EmptyViewport {
            width: 0,
            height: 300
        }
    );
    assert_eq!((scene.viewport.width, scene.viewport.height), (800, 600));
}

#[test]
fn playing_advances_time_by_speed_each_frame() {
    let mut scene = running_scene();
    let speed = scene.uniforms.big_waves_speed;
    scene.step(0.016, 16.0);
    scene.step(0.032, 32.0);
    assert_relative_eq!(scene.uniforms.time, 2.0 * speed, epsilon = 1e-6);
}

#[test]
fn stopped_frames_leave_time_stats_and_camera_alone() {
    let mut scene = running_scene();
    scene.step(0.016, 16.0);
    assert_eq!(scene.stop(), LoopCommand::Cancel);

    let time = scene.uniforms.time;
    let frames = scene.stats.pending_frames();
    let position = scene.camera.position;
    scene.controls.rotate(200.0, 50.0, 600.0);

    for i in 2..10 {
        let step = scene.step(i as f64 * 0.016, i as f64 * 16.0);
        assert!(!step.camera_moved);
        assert!(step.stats.is_none());
    }
    assert_eq!(scene.uniforms.time, time);
    assert_eq!(scene.stats.pending_frames(), frames);
    assert_eq!(scene.camera.position, position);
    assert!(scene.controls.has_pending_motion());
}

#[test]
fn play_after_stop_resumes_time() {
    let mut scene = running_scene();
    scene.step(0.016, 16.0);
    scene.stop();
    scene.step(0.032, 32.0);
    let frozen = scene.uniforms.time;

    assert_eq!(scene.play(), LoopCommand::Schedule);
    scene.step(0.048, 48.0);
    assert!(scene.uniforms.time > frozen);
}

#[test]
fn repeated_play_schedules_once() {
    let mut scene = make_scene();
    assert_eq!(scene.play(), LoopCommand::Schedule);
    assert_eq!(scene.play(), LoopCommand::Nothing);
    assert_eq!(scene.play(), LoopCommand::Nothing);
    assert_eq!(scene.stop(), LoopCommand::Cancel);
    assert_eq!(scene.stop(), LoopCommand::Nothing);
}

#[test]
fn dispose_is_terminal() {
    let mut scene = running_scene();
    assert_eq!(scene.dispose(), LoopCommand::Cancel);
    assert_eq!(scene.play(), LoopCommand::Nothing);
    assert_eq!(scene.loop_state(), LoopState::Disposed);
    assert_eq!(scene.dispose(), LoopCommand::Nothing);
}

#[test]
fn elevation_control_writes_uniform_immediately() {
    let mut scene = make_scene();
    scene.set_control(BoundField::Elevation, 0.731);
    assert_relative_eq!(scene.uniforms.big_waves_elevation, 0.731, epsilon = 1e-6);
    // Independent of the loop state
    scene.play();
    scene.stop();
    scene.set_control(BoundField::Elevation, 0.25);
    assert_relative_eq!(scene.control_value(BoundField::Elevation), 0.25, epsilon = 1e-6);
}

#[test]
fn speed_edit_changes_next_increment() {
    let mut scene = running_scene();
    scene.set_control(BoundField::Speed, 0.3);
    scene.step(0.016, 16.0);
    assert_relative_eq!(scene.uniforms.time, 0.3, epsilon = 1e-6);
}

#[test]
fn depth_color_control_parses_hex() {
    let mut scene = make_scene();
    let c = scene.set_color(ColorField::Depth, "#112233").unwrap();
    assert_relative_eq!(c.r, 0x11 as f32 / 255.0, epsilon = 1e-6);
    assert_relative_eq!(c.g, 0x22 as f32 / 255.0, epsilon = 1e-6);
    assert_relative_eq!(c.b, 0x33 as f32 / 255.0, epsilon = 1e-6);
    assert_eq!(scene.uniforms.depth_color, c);
    assert_eq!(scene.debug_colors.depth_color, "#112233");
    // Surface untouched
    assert_eq!(scene.color(ColorField::Surface).to_hex(), "#ffe770");
}

#[test]
fn invalid_color_leaves_uniform_unchanged() {
    let mut scene = make_scene();
    let before = scene.uniforms.surface_color;
    assert!(scene.set_color(ColorField::Surface, "not-a-color").is_err());
    assert_eq!(scene.uniforms.surface_color, before);
    assert_eq!(scene.debug_colors.surface_color, "#ffe770");
}

#[test]
fn stats_publish_while_playing() {
    let mut scene = running_scene();
    let mut published = None;
    for i in 1..=70 {
        let t = i as f64 * (1000.0 / 60.0);
        if let Some(s) = scene.step(t / 1000.0, t).stats {
            published = Some(s);
        }
    }
    let sample = published.expect("one sample after a second of frames");
    assert!((sample.fps - 60.0).abs() < 1.5, "fps was {}", sample.fps);
}

#[test]
fn bloom_toggle_is_explicit() {
    let viewport = Viewport::new(10, 10, 1.0).unwrap();
    let options = SceneOptions {
        bloom: true,
        ..SceneOptions::default()
    };
    let mut scene = SceneState::new(viewport, &options, 0.0).unwrap();
    assert!(scene.post.enabled);
    scene.set_bloom_enabled(false);
    assert!(!scene.post.enabled);
}

#[test]
fn packed_uniforms_carry_current_values() {
    let mut scene = running_scene();
    scene.set_control(BoundField::FrequencyX, 7.5);
    scene.step(0.016, 16.0);
    let packed = scene.packed_uniforms();
    assert_eq!(packed.frequency[0], 7.5);
    assert_relative_eq!(packed.time, scene.uniforms.time);
    assert_eq!(packed.depth_color[3], 1.0);
}

#[test]
fn edits_while_stopped_need_a_redraw() {
    let mut scene = make_scene();
    assert!(scene.needs_redraw());
    scene.play();
    assert!(!scene.needs_redraw());
    scene.set_control(BoundField::Elevation, 0.4);
    assert!(!scene.needs_redraw());
    scene.stop();
    scene.set_control(BoundField::Elevation, 0.6);
    assert!(scene.needs_redraw());
    scene.dispose();
    assert!(!scene.needs_redraw());
}

#[test]
fn bloom_size_follows_downscale_constant() {
    use scene_core::constants::BLOOM_DOWNSCALE;
    use scene_core::settings::bloom_extent;

    let mut scene = make_scene();
    scene.resize(1000, 500, 1.0).unwrap();
    assert_eq!(
        scene.post.bloom_size(),
        (1000 / BLOOM_DOWNSCALE, 500 / BLOOM_DOWNSCALE)
    );
    assert_eq!(scene.post.bloom_size(), bloom_extent(1000, 500));
    assert_eq!(bloom_extent(1, 1), (1, 1));
}

#[test]
fn oversized_textures_are_rejected() {
    use scene_core::settings::texture_fits;

    assert!(texture_fits(1024, 1024, 8192));
    assert!(texture_fits(8192, 1, 8192));
    assert!(!texture_fits(9000, 9000, 8192));
    assert!(!texture_fits(1, 8193, 8192));
    assert!(!texture_fits(0, 16, 8192));
}
