//! Tunable parameter bags and construction options.

use crate::constants::{BLOOM_DOWNSCALE, DEFAULT_DEPTH_COLOR, DEFAULT_SURFACE_COLOR};
use crate::scene::Viewport;

pub const DEFAULT_TEXTURE_URL: &str = "abs.png";

/// Size of the bright/blur targets for a render target of `width x height`.
#[inline]
pub fn bloom_extent(width: u32, height: u32) -> (u32, u32) {
    (
        (width / BLOOM_DOWNSCALE).max(1),
        (height / BLOOM_DOWNSCALE).max(1),
    )
}

/// Whether a decoded image can be uploaded as a single 2D texture.
pub fn texture_fits(width: u32, height: u32, max_dimension: u32) -> bool {
    width > 0 && height > 0 && width <= max_dimension && height <= max_dimension
}

/// Bloom pass parameters and the output exposure multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomSettings {
    pub exposure: f32,
    pub bloom_threshold: f32,
    pub bloom_strength: f32,
    pub bloom_radius: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            bloom_threshold: 0.1,
            bloom_strength: 0.2,
            bloom_radius: 1.2,
        }
    }
}

/// Hex strings backing the two color controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugColors {
    pub depth_color: String,
    pub surface_color: String,
}

impl Default for DebugColors {
    fn default() -> Self {
        Self {
            depth_color: DEFAULT_DEPTH_COLOR.to_string(),
            surface_color: DEFAULT_SURFACE_COLOR.to_string(),
        }
    }
}

/// Post-processing chain description. The composer is always built and kept
/// sized to the viewport; `enabled` decides whether its output is presented.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostProcessing {
    pub enabled: bool,
    pub bloom: BloomSettings,
    pub target: Viewport,
}

impl PostProcessing {
    pub fn new(enabled: bool, bloom: BloomSettings, target: Viewport) -> Self {
        Self {
            enabled,
            bloom,
            target,
        }
    }

    pub fn set_size(&mut self, viewport: Viewport) {
        self.target = viewport;
    }

    /// Reduced size used by the bright and blur passes.
    pub fn bloom_size(&self) -> (u32, u32) {
        let (w, h) = self.target.backing_size();
        bloom_extent(w, h)
    }
}

/// Options recognized at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneOptions {
    pub bloom: bool,
    pub texture_url: String,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            bloom: false,
            texture_url: DEFAULT_TEXTURE_URL.to_string(),
        }
    }
}
