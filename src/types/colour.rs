//! Colour type, hex parsing and HSL conversion.

use std::fmt;
use std::str::FromStr;

use palette::{IntoColor, RgbHue, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SwatchError};

/// An opaque RGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A colour in HSL space: hue in degrees `[0, 360)`, saturation and
/// lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Single HSL channel addressed by palette edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HslProperty {
    H,
    S,
    L,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black. Also the lenient fallback for unparsable hex.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a `#RRGGBB` hex string (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        // from_str_radix alone would accept a sign, e.g. "+A"
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SwatchError::Parse {
                message: format!("Invalid hex colour: {}", s),
                help: Some("Use #RRGGBB format, e.g. #FF6B35".to_string()),
            });
        }

        let r = parse_hex_byte(&hex[0..2])?;
        let g = parse_hex_byte(&hex[2..4])?;
        let b = parse_hex_byte(&hex[4..6])?;
        Ok(Self::rgb(r, g, b))
    }

    /// Build a colour from floating-point channels, rounding and clamping
    /// each to `[0, 255]`.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Convert to HSL.
    pub fn to_hsl(self) -> Hsl {
        let rgb: Srgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let hsl: palette::Hsl = rgb.into_color();

        let mut h = hsl.hue.into_positive_degrees();
        if h >= 360.0 {
            h -= 360.0;
        }

        Hsl {
            h,
            s: hsl.saturation * 100.0,
            l: hsl.lightness * 100.0,
        }
    }

    /// Convert from HSL. A saturation of zero yields a grey whose channels
    /// all equal the lightness, whatever the hue.
    pub fn from_hsl(hsl: Hsl) -> Self {
        let hsl = hsl.normalized();
        let source = palette::Hsl::new(
            RgbHue::from_degrees(hsl.h),
            hsl.s / 100.0,
            hsl.l / 100.0,
        );
        let rgb: Srgb<f32> = source.into_color();

        Self::from_channels(
            rgb.red as f64 * 255.0,
            rgb.green as f64 * 255.0,
            rgb.blue as f64 * 255.0,
        )
    }

    /// Linear blend towards `other` (0.0 = self, 1.0 = other).
    pub fn mix(self, other: Colour, ratio: f64) -> Colour {
        let ratio = ratio.clamp(0.0, 1.0);
        let inv = 1.0 - ratio;

        Colour::from_channels(
            self.r as f64 * inv + other.r as f64 * ratio,
            self.g as f64 * inv + other.g as f64 * ratio,
            self.b as f64 * inv + other.b as f64 * ratio,
        )
    }

    /// Rotate the hue by `degrees`, holding saturation and lightness.
    pub fn rotate_hue(self, degrees: f32) -> Colour {
        let hsl = self.to_hsl();
        Colour::from_hsl(Hsl {
            h: hsl.h + degrees,
            ..hsl
        })
    }

    /// Convert to an RGB tuple.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Wrap hue into `[0, 360)` and clamp saturation/lightness to `[0, 100]`.
    pub fn normalized(self) -> Self {
        let mut h = self.h.rem_euclid(360.0);
        if h >= 360.0 {
            h = 0.0;
        }
        Self {
            h,
            s: self.s.clamp(0.0, 100.0),
            l: self.l.clamp(0.0, 100.0),
        }
    }

    /// Replace one channel.
    pub fn with(self, property: HslProperty, value: f32) -> Self {
        match property {
            HslProperty::H => Self { h: value, ..self },
            HslProperty::S => Self { s: value, ..self },
            HslProperty::L => Self { l: value, ..self },
        }
        .normalized()
    }
}

impl FromStr for Colour {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HslProperty {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hue" => Ok(HslProperty::H),
            "s" | "saturation" => Ok(HslProperty::S),
            "l" | "lightness" => Ok(HslProperty::L),
            other => Err(SwatchError::Parse {
                message: format!("Unknown HSL property: {}", other),
                help: Some("Use h, s or l".to_string()),
            }),
        }
    }
}

/// Parse `#RRGGBB`, returning black for anything unparsable.
///
/// Lenient by contract; request validation uses [`Colour::from_hex`] so bad
/// input is rejected before it reaches this path.
pub fn hex_to_rgb(hex: &str) -> Colour {
    Colour::from_hex(hex).unwrap_or(Colour::BLACK)
}

/// Format channels as `#RRGGBB`, rounding and clamping each channel.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Colour::from_channels(r, g, b).to_string()
}

pub fn rgb_to_hsl(colour: Colour) -> Hsl {
    colour.to_hsl()
}

pub fn hsl_to_rgb(hsl: Hsl) -> Colour {
    Colour::from_hsl(hsl)
}

/// Blend two hex colours channel by channel.
pub fn mix_colors(a: &str, b: &str, ratio: f64) -> String {
    hex_to_rgb(a).mix(hex_to_rgb(b), ratio).to_string()
}

fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| SwatchError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f32, b: f32, tolerance: f32) -> bool {
        (a - b).abs() <= tolerance
    }

    fn hue_close(a: f32, b: f32, tolerance: f32) -> bool {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d) <= tolerance
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Colour::from_hex("#FF0000").unwrap(), Colour::rgb(255, 0, 0));
        assert_eq!(Colour::from_hex("#1a1a2e").unwrap(), Colour::rgb(0x1a, 0x1a, 0x2e));
        assert_eq!(Colour::from_hex("00ff7f").unwrap(), Colour::rgb(0, 255, 127));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGGGGG").is_err());
        assert!(Colour::from_hex("#F00").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
        assert!(Colour::from_hex("#+A+B+C").is_err());
        assert!(Colour::from_hex("-A0B0C").is_err());
    }

    #[test]
    fn test_hex_to_rgb_lenient() {
        assert_eq!(hex_to_rgb("not a colour"), Colour::BLACK);
        assert_eq!(hex_to_rgb("#00FF00"), Colour::rgb(0, 255, 0));
    }

    #[test]
    fn test_rgb_to_hex_rounds_and_clamps() {
        assert_eq!(rgb_to_hex(254.6, -3.0, 300.0), "#FF00FF");
        assert_eq!(rgb_to_hex(10.4, 10.5, 0.0), "#0A0B00");
        assert_eq!(rgb_to_hex(1.0, 2.0, 3.0), "#010203");
    }

    #[test]
    fn test_primary_to_hsl() {
        let red = Colour::rgb(255, 0, 0).to_hsl();
        assert!(close(red.h, 0.0, 0.01));
        assert!(close(red.s, 100.0, 0.01));
        assert!(close(red.l, 50.0, 0.01));

        let blue = Colour::rgb(0, 0, 255).to_hsl();
        assert!(close(blue.h, 240.0, 0.01));
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        for hue in [0.0, 45.0, 180.0, 300.0] {
            let c = Colour::from_hsl(Hsl::new(hue, 0.0, 50.0));
            assert_eq!(c.r, c.g);
            assert_eq!(c.g, c.b);
            assert_eq!(c.r, 128);
        }
    }

    #[test]
    fn test_hue_wraps() {
        let a = Colour::from_hsl(Hsl::new(390.0, 80.0, 50.0));
        let b = Colour::from_hsl(Hsl::new(30.0, 80.0, 50.0));
        assert_eq!(a, b);
        let c = Colour::from_hsl(Hsl::new(-90.0, 80.0, 50.0));
        let d = Colour::from_hsl(Hsl::new(270.0, 80.0, 50.0));
        assert_eq!(c, d);
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix_colors("#102030", "#F0E0D0", 0.0), "#102030");
        assert_eq!(mix_colors("#102030", "#F0E0D0", 1.0), "#F0E0D0");
        assert_eq!(mix_colors("#000000", "#FFFFFF", 0.5), "#808080");
    }

    #[test]
    fn test_mix_clamps_ratio() {
        assert_eq!(mix_colors("#102030", "#F0E0D0", -1.0), "#102030");
        assert_eq!(mix_colors("#102030", "#F0E0D0", 7.0), "#F0E0D0");
    }

    #[test]
    fn test_hsl_property_parse() {
        assert_eq!("h".parse::<HslProperty>().unwrap(), HslProperty::H);
        assert_eq!("Lightness".parse::<HslProperty>().unwrap(), HslProperty::L);
        assert!("x".parse::<HslProperty>().is_err());
    }

    proptest! {
        #[test]
        fn prop_hex_round_trip(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let hex = rgb_to_hex(r as f64, g as f64, b as f64);
            prop_assert_eq!(hex_to_rgb(&hex), Colour::rgb(r, g, b));
        }

        #[test]
        fn prop_rgb_through_hsl(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let original = Colour::rgb(r, g, b);
            let back = Colour::from_hsl(original.to_hsl());
            prop_assert!((back.r as i16 - r as i16).abs() <= 1);
            prop_assert!((back.g as i16 - g as i16).abs() <= 1);
            prop_assert!((back.b as i16 - b as i16).abs() <= 1);
        }

        #[test]
        fn prop_hsl_round_trip(h in 0.0f32..360.0, s in 0.0f32..=100.0, l in 0.0f32..=100.0) {
            let back = Colour::from_hsl(Hsl::new(h, s, l)).to_hsl();
            prop_assert!(close(back.l, l, 1.0), "lightness {} vs {}", back.l, l);

            // Rounding to 8-bit channels moves each by up to 0.5/255, which
            // saturation and hue amplify as the chroma window shrinks
            let window = 1.0 - (2.0 * l / 100.0 - 1.0).abs();
            if window >= 0.05 {
                let tolerance = 0.5 + 1.0 / window;
                prop_assert!(close(back.s, s, tolerance), "saturation {} vs {}", back.s, s);
            }
            let chroma = window * s / 100.0;
            if chroma >= 0.05 {
                let tolerance = 0.5 + 0.6 / chroma;
                prop_assert!(hue_close(back.h, h, tolerance), "hue {} vs {}", back.h, h);
            }
        }

        #[test]
        fn prop_mix_identity(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, ratio in 0.0f64..=1.0) {
            let hex = Colour::rgb(r, g, b).to_string();
            prop_assert_eq!(mix_colors(&hex, &hex, ratio), hex);
        }
    }
}
