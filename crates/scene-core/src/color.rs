use crate::error::SceneError;
use std::fmt;
use std::str::FromStr;

/// sRGB color with channels normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` or `#rgb`; the leading `#` is optional.
    pub fn from_hex(input: &str) -> Result<Self, SceneError> {
        let invalid = || SceneError::InvalidColor(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::from_rgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::from_rgb8(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Channels decoded from sRGB to linear light, as the shader mixes them.
    pub fn to_linear(&self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

impl FromStr for Color {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_long_and_short_forms() {
        let long = Color::from_hex("#ffe770").unwrap();
        assert_eq!(long.to_rgb8(), [0xff, 0xe7, 0x70]);
        let short = Color::from_hex("abc").unwrap();
        assert_eq!(short.to_rgb8(), [0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#+1+2+3").is_err());
    }

    #[test]
    fn hex_survives_display() {
        let c: Color = "#A30000".parse().unwrap();
        assert_eq!(c.to_string(), "#a30000");
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        let white = Color::new(1.0, 1.0, 1.0).to_linear();
        let black = Color::new(0.0, 0.0, 0.0).to_linear();
        for c in white {
            assert_relative_eq!(c, 1.0, epsilon = 1e-5);
        }
        for c in black {
            assert_relative_eq!(c, 0.0, epsilon = 1e-6);
        }
        let mid = Color::new(0.5, 0.5, 0.5).to_linear();
        assert!(mid[0] > 0.2 && mid[0] < 0.22);
    }
}
