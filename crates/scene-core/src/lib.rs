//! Platform-free state for the wave scene.
//!
//! Nothing in here touches the DOM or the GPU. The web front-end owns a
//! [`SceneState`] behind an `Rc<RefCell<..>>`, feeds it pointer deltas,
//! control edits and frame timestamps, and reads back packed uniforms and
//! camera matrices for drawing.

pub mod camera;
pub mod clock;
pub mod color;
pub mod constants;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod gui;
pub mod scene;
pub mod settings;
pub mod stats;
pub mod uniforms;

// Shaders bundled as string constants
pub static WAVE_WGSL: &str = include_str!("../shaders/wave.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::PerspectiveCamera;
pub use clock::FrameClock;
pub use color::Color;
pub use controls::OrbitControls;
pub use error::SceneError;
pub use geometry::{PlaneGeometry, PlaneVertex};
pub use gui::{BoundField, ColorField, Control, SliderSpec, WAVE_CONTROLS};
pub use scene::{FrameStep, LoopCommand, LoopState, SceneState, Viewport};
pub use settings::{BloomSettings, DebugColors, PostProcessing, SceneOptions};
pub use stats::{FpsSample, FrameStats};
pub use uniforms::{PackedWaveUniforms, WaveUniforms};
