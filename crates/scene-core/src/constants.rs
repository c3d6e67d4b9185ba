use std::f32::consts::FRAC_PI_2;

// Camera
pub const CAMERA_FOV_DEG: f32 = 33.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: [f32; 3] = [2.6, 1.4, 2.9];

// Orbit controls
pub const CONTROLS_DAMPING_FACTOR: f32 = 0.1;
pub const CONTROLS_ROTATE_SPEED: f32 = 1.0;
pub const CONTROLS_ZOOM_SPEED: f32 = 1.0;
pub const CONTROLS_PAN_SPEED: f32 = 1.0;

// Mesh: a 5x5 plane laid flat and lifted slightly
pub const PLANE_SIZE: f32 = 5.0;
pub const PLANE_SEGMENTS: u32 = 1024;
pub const MESH_ROTATION_X: f32 = -FRAC_PI_2;
pub const MESH_POSITION: [f32; 3] = [0.0, 0.2, 0.0];

// Material defaults
pub const DEFAULT_DEPTH_COLOR: &str = "#a30000";
pub const DEFAULT_SURFACE_COLOR: &str = "#ffe770";
pub const DEFAULT_WAVES_SPEED: f32 = 0.124;
pub const DEFAULT_WAVES_ELEVATION: f32 = 0.13;
pub const DEFAULT_WAVES_FREQUENCY: [f32; 2] = [4.0, 1.5];
pub const DEFAULT_COLOR_MULTIPLIER: f32 = 8.59;
pub const DEFAULT_COLOR_OFFSET: f32 = 0.9;

// Renderer output
pub const TONE_MAPPING_EXPOSURE: f32 = 1.6;
// Bloom targets are this many times smaller than the render target
pub const BLOOM_DOWNSCALE: u32 = 2;

// Stats sampling window
pub const STATS_SAMPLE_MS: f64 = 1000.0;
