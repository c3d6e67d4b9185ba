//! Control descriptions for the debug panel.
//!
//! Each slider is bound to exactly one uniform field through [`BoundField`];
//! the panel never holds the uniform set itself, only the field tag.

use crate::uniforms::WaveUniforms;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundField {
    Elevation,
    FrequencyX,
    FrequencyY,
    Speed,
    ColorOffset,
    ColorMultiplier,
}

impl BoundField {
    pub fn get(self, u: &WaveUniforms) -> f32 {
        match self {
            BoundField::Elevation => u.big_waves_elevation,
            BoundField::FrequencyX => u.big_waves_frequency.x,
            BoundField::FrequencyY => u.big_waves_frequency.y,
            BoundField::Speed => u.big_waves_speed,
            BoundField::ColorOffset => u.color_offset,
            BoundField::ColorMultiplier => u.color_multiplier,
        }
    }

    pub fn set(self, u: &mut WaveUniforms, value: f32) {
        let slot = match self {
            BoundField::Elevation => &mut u.big_waves_elevation,
            BoundField::FrequencyX => &mut u.big_waves_frequency.x,
            BoundField::FrequencyY => &mut u.big_waves_frequency.y,
            BoundField::Speed => &mut u.big_waves_speed,
            BoundField::ColorOffset => &mut u.color_offset,
            BoundField::ColorMultiplier => &mut u.color_multiplier,
        };
        *slot = value;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorField {
    Depth,
    Surface,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSpec {
    pub label: &'static str,
    pub field: BoundField,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderSpec {
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Number of decimals needed to show a value at this step size.
    pub fn decimals(&self) -> usize {
        let mut step = self.step.abs();
        let mut n = 0;
        while n < 6 && (step - step.round()).abs() > 1e-6 {
            step *= 10.0;
            n += 1;
        }
        n
    }

    pub fn format(&self, value: f32) -> String {
        format!("{:.*}", self.decimals(), value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    Slider(SliderSpec),
    Color {
        label: &'static str,
        field: ColorField,
    },
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Control::Slider(s) => s.label,
            Control::Color { label, .. } => label,
        }
    }
}

const fn slider(label: &'static str, field: BoundField, min: f32, max: f32, step: f32) -> Control {
    Control::Slider(SliderSpec {
        label,
        field,
        min,
        max,
        step,
    })
}

/// Panel layout, top to bottom.
pub const WAVE_CONTROLS: [Control; 8] = [
    slider("uBigWavesElevation", BoundField::Elevation, 0.0, 1.0, 0.001),
    slider("uBigWavesFrequency-X", BoundField::FrequencyX, 0.0, 10.0, 0.001),
    slider("uBigWavesFrequency-Y", BoundField::FrequencyY, 0.0, 10.0, 0.001),
    slider("Speed", BoundField::Speed, 0.01, 0.3, 0.001),
    Control::Color {
        label: "depthColour",
        field: ColorField::Depth,
    },
    Control::Color {
        label: "surfaceColor",
        field: ColorField::Surface,
    },
    slider("Color Offset", BoundField::ColorOffset, 0.0, 1.0, 0.1),
    slider("Multiplier", BoundField::ColorMultiplier, 1.0, 10.0, 0.01),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_round_trips_through_binding() {
        let mut u = WaveUniforms::default();
        for control in WAVE_CONTROLS {
            if let Control::Slider(spec) = control {
                spec.field.set(&mut u, 0.42);
                assert_eq!(spec.field.get(&u), 0.42, "{}", spec.label);
            }
        }
    }

    #[test]
    fn decimals_follow_step() {
        let s = |step| SliderSpec {
            label: "x",
            field: BoundField::Speed,
            min: 0.0,
            max: 1.0,
            step,
        };
        assert_eq!(s(0.001).decimals(), 3);
        assert_eq!(s(0.1).decimals(), 1);
        assert_eq!(s(1.0).decimals(), 0);
        assert_eq!(s(0.01).format(8.59), "8.59");
    }

    #[test]
    fn defaults_sit_inside_slider_ranges() {
        let u = WaveUniforms::default();
        for control in WAVE_CONTROLS {
            if let Control::Slider(spec) = control {
                let v = spec.field.get(&u);
                assert_eq!(spec.clamp(v), v, "{} default out of range", spec.label);
            }
        }
    }
}
