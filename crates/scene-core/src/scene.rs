//! Scene controller state machine.
//!
//! `SceneState` is everything the frame loop and the debug panel mutate. The
//! web front-end turns [`LoopCommand`]s into `requestAnimationFrame` /
//! `cancelAnimationFrame` calls so that at most one frame task is pending.

use crate::camera::PerspectiveCamera;
use crate::clock::FrameClock;
use crate::color::Color;
use crate::constants::CONTROLS_DAMPING_FACTOR;
use crate::controls::OrbitControls;
use crate::error::SceneError;
use crate::geometry::mesh_model_matrix;
use crate::gui::{BoundField, ColorField};
use crate::settings::{BloomSettings, DebugColors, PostProcessing, SceneOptions};
use crate::stats::{FpsSample, FrameStats};
use crate::uniforms::{PackedWaveUniforms, WaveUniforms};
use glam::{Mat4, Vec3};

/// CSS-pixel size of the container plus the device pixel ratio in use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            pixel_ratio: pixel_ratio.max(f32::EPSILON),
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Size of the drawing buffer in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width as f32 * self.pixel_ratio).floor() as u32;
        let h = (self.height as f32 * self.pixel_ratio).floor() as u32;
        (w.max(1), h.max(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
    Disposed,
}

/// What the host must do with its pending animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCommand {
    Schedule,
    Cancel,
    Nothing,
}

/// Result of one frame step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStep {
    pub delta: f64,
    pub time: f32,
    pub camera_moved: bool,
    pub stats: Option<FpsSample>,
}

pub struct SceneState {
    pub uniforms: WaveUniforms,
    pub debug_colors: DebugColors,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub post: PostProcessing,
    pub viewport: Viewport,
    pub clock: FrameClock,
    pub stats: FrameStats,
    pub model: Mat4,
    loop_state: LoopState,
}

impl SceneState {
    /// Build the scene for a container of `viewport` size. The loop starts
    /// out stopped; the first `play()` returns [`LoopCommand::Schedule`].
    pub fn new(viewport: Viewport, options: &SceneOptions, now_ms: f64) -> Result<Self, SceneError> {
        let debug_colors = DebugColors::default();
        let uniforms = WaveUniforms::new(&debug_colors)?;
        let mut camera = PerspectiveCamera::new(viewport.aspect());
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.update(&mut camera);
        controls.enable_damping = true;
        controls.damping_factor = CONTROLS_DAMPING_FACTOR;

        Ok(Self {
            uniforms,
            debug_colors,
            camera,
            controls,
            post: PostProcessing::new(options.bloom, BloomSettings::default(), viewport),
            viewport,
            clock: FrameClock::default(),
            stats: FrameStats::new(now_ms),
            model: mesh_model_matrix(),
            loop_state: LoopState::Stopped,
        })
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn is_playing(&self) -> bool {
        self.loop_state == LoopState::Running
    }

    /// True when a change must be drawn by a one-off frame: the loop is
    /// stopped, so nothing else will pick it up.
    pub fn needs_redraw(&self) -> bool {
        self.loop_state == LoopState::Stopped
    }

    pub fn play(&mut self) -> LoopCommand {
        match self.loop_state {
            LoopState::Stopped => {
                self.loop_state = LoopState::Running;
                LoopCommand::Schedule
            }
            LoopState::Running => LoopCommand::Nothing,
            LoopState::Disposed => {
                log::warn!("[scene] play() after dispose ignored");
                LoopCommand::Nothing
            }
        }
    }

    pub fn stop(&mut self) -> LoopCommand {
        match self.loop_state {
            LoopState::Running => {
                self.loop_state = LoopState::Stopped;
                LoopCommand::Cancel
            }
            _ => LoopCommand::Nothing,
        }
    }

    pub fn dispose(&mut self) -> LoopCommand {
        let was_running = self.loop_state == LoopState::Running;
        self.loop_state = LoopState::Disposed;
        if was_running {
            LoopCommand::Cancel
        } else {
            LoopCommand::Nothing
        }
    }

    /// Track a new container size. The post-processing target follows the
    /// viewport and the camera aspect becomes `width / height`.
    pub fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) -> Result<Viewport, SceneError> {
        let viewport = Viewport::new(width, height, pixel_ratio)?;
        self.viewport = viewport;
        self.post.set_size(viewport);
        self.camera.set_aspect(viewport.aspect());
        Ok(viewport)
    }

    /// Per-frame bookkeeping, run after the frame has been drawn. While not
    /// playing only the clock advances.
    pub fn step(&mut self, elapsed_sec: f64, now_ms: f64) -> FrameStep {
        let delta = self.clock.tick(elapsed_sec);
        if !self.is_playing() {
            return FrameStep {
                delta,
                time: self.uniforms.time,
                camera_moved: false,
                stats: None,
            };
        }
        let camera_moved = self.controls.update(&mut self.camera);
        let stats = self.stats.update(now_ms);
        let time = self.uniforms.advance();
        FrameStep {
            delta,
            time,
            camera_moved,
            stats,
        }
    }

    pub fn set_control(&mut self, field: BoundField, value: f32) {
        field.set(&mut self.uniforms, value);
    }

    pub fn control_value(&self, field: BoundField) -> f32 {
        field.get(&self.uniforms)
    }

    /// Apply a hex string from a color control. On error nothing changes.
    pub fn set_color(&mut self, field: ColorField, hex: &str) -> Result<Color, SceneError> {
        let color = Color::from_hex(hex)?;
        match field {
            ColorField::Depth => {
                self.debug_colors.depth_color = hex.to_string();
                self.uniforms.depth_color = color;
            }
            ColorField::Surface => {
                self.debug_colors.surface_color = hex.to_string();
                self.uniforms.surface_color = color;
            }
        }
        Ok(color)
    }

    pub fn color(&self, field: ColorField) -> Color {
        match field {
            ColorField::Depth => self.uniforms.depth_color,
            ColorField::Surface => self.uniforms.surface_color,
        }
    }

    pub fn set_bloom_enabled(&mut self, enabled: bool) {
        self.post.enabled = enabled;
    }

    pub fn packed_uniforms(&self) -> PackedWaveUniforms {
        self.uniforms.pack(self.camera.view_projection(), self.model)
    }
}
