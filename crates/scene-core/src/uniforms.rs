use crate::color::Color;
use crate::constants::*;
use crate::error::SceneError;
use crate::settings::DebugColors;
use glam::{Mat4, Vec2};

/// Inputs of the wave material. Field identities are fixed for the lifetime
/// of the scene; controls and the frame loop only overwrite values.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveUniforms {
    pub time: f32,
    pub big_waves_speed: f32,
    pub resolution: f32,
    pub big_waves_elevation: f32,
    pub big_waves_frequency: Vec2,
    pub depth_color: Color,
    pub surface_color: Color,
    pub color_multiplier: f32,
    pub color_offset: f32,
}

impl WaveUniforms {
    pub fn new(colors: &DebugColors) -> Result<Self, SceneError> {
        Ok(Self {
            time: 0.0,
            big_waves_speed: DEFAULT_WAVES_SPEED,
            resolution: 0.0,
            big_waves_elevation: DEFAULT_WAVES_ELEVATION,
            big_waves_frequency: Vec2::from_array(DEFAULT_WAVES_FREQUENCY),
            depth_color: Color::from_hex(&colors.depth_color)?,
            surface_color: Color::from_hex(&colors.surface_color)?,
            color_multiplier: DEFAULT_COLOR_MULTIPLIER,
            color_offset: DEFAULT_COLOR_OFFSET,
        })
    }

    /// Advance `time` by the current speed value and return the new time.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.time += self.big_waves_speed;
        self.time
    }

    pub fn pack(&self, view_proj: Mat4, model: Mat4) -> PackedWaveUniforms {
        let rgba = |c: &Color| {
            let [r, g, b] = c.to_linear();
            [r, g, b, 1.0]
        };
        PackedWaveUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            depth_color: rgba(&self.depth_color),
            surface_color: rgba(&self.surface_color),
            frequency: self.big_waves_frequency.to_array(),
            time: self.time,
            speed: self.big_waves_speed,
            elevation: self.big_waves_elevation,
            color_offset: self.color_offset,
            color_multiplier: self.color_multiplier,
            resolution: self.resolution,
        }
    }
}

impl Default for WaveUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            big_waves_speed: DEFAULT_WAVES_SPEED,
            resolution: 0.0,
            big_waves_elevation: DEFAULT_WAVES_ELEVATION,
            big_waves_frequency: Vec2::from_array(DEFAULT_WAVES_FREQUENCY),
            depth_color: Color::from_rgb8(0xa3, 0x00, 0x00),
            surface_color: Color::from_rgb8(0xff, 0xe7, 0x70),
            color_multiplier: DEFAULT_COLOR_MULTIPLIER,
            color_offset: DEFAULT_COLOR_OFFSET,
        }
    }
}

/// GPU layout of [`WaveUniforms`], mirrored by `WaveUniforms` in `wave.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedWaveUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub depth_color: [f32; 4],
    pub surface_color: [f32; 4],
    pub frequency: [f32; 2],
    pub time: f32,
    pub speed: f32,
    pub elevation: f32,
    pub color_offset: f32,
    pub color_multiplier: f32,
    pub resolution: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_debug_colors() {
        let from_bag = WaveUniforms::new(&DebugColors::default()).unwrap();
        assert_eq!(from_bag, WaveUniforms::default());
    }

    #[test]
    fn packed_layout_is_uniform_aligned() {
        assert_eq!(std::mem::size_of::<PackedWaveUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<PackedWaveUniforms>(), 192);
    }

    #[test]
    fn advance_reads_speed_each_time() {
        let mut u = WaveUniforms::default();
        u.big_waves_speed = 0.5;
        u.advance();
        u.big_waves_speed = 0.25;
        let t = u.advance();
        assert!((t - 0.75).abs() < 1e-6);
    }
}
