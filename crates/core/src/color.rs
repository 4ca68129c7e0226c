//! The canonical `Color` value type and the conversion math between hex,
//! RGB(A) and HSL(A).
//!
//! A `Color` stores both its RGB and HSL forms. RGB is the source of truth:
//! HSL is always [`rgb_to_hsl`] of the stored channels, even for colors built
//! from HSL input. Fields are private so the two forms cannot drift apart.
//!
//! HSL components are integer-rounded. Converting RGB to HSL and back may
//! therefore move a channel by a small amount; hex and RGB round trips are
//! exact.

use crate::error::ColorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A color with 8-bit RGB channels, a real alpha in [0, 1], and integer HSL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: f64,
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl Color {
    /// Parses 3, 4, 6 or 8 hex digits, with or without a leading `#`
    /// (case insensitive).
    ///
    /// Short forms are expanded by doubling each digit, so `#BAD` is
    /// `#BBAADD`. The 4th (or 7th and 8th) digit is the alpha byte.
    /// Returns `ColorError::InvalidColor` for any other length or a non-hex digit.
    pub fn from_hex(hex: &str) -> Result<Color, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidColor(format!(
                "non-hex digit in {hex:?}"
            )));
        }
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            n => {
                return Err(ColorError::InvalidColor(format!(
                    "expected 3, 4, 6 or 8 hex digits, got {n}"
                )))
            }
        };
        let byte = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|e| ColorError::InvalidColor(format!("invalid hex byte: {e}")))
        };
        let (r, g, b) = (byte(0)?, byte(2)?, byte(4)?);
        let alpha = if expanded.len() == 8 {
            byte(6)? as f64 / 255.0
        } else {
            1.0
        };
        Color::from_rgba(r, g, b, alpha)
    }

    /// Builds an opaque color from RGB channels. HSL is derived.
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Color {
        let (hue, saturation, lightness) = rgb_to_hsl(red, green, blue);
        Color {
            red,
            green,
            blue,
            alpha: 1.0,
            hue,
            saturation,
            lightness,
        }
    }

    /// Builds a color from RGB channels and an alpha in [0, 1].
    pub fn from_rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Result<Color, ColorError> {
        let alpha = check_alpha(alpha)?;
        Ok(Color {
            alpha,
            ..Color::from_rgb(red, green, blue)
        })
    }

    /// Builds an opaque color from hue in [0, 360), saturation and lightness in [0, 100].
    /// RGB is derived.
    pub fn from_hsl(hue: u16, saturation: u8, lightness: u8) -> Result<Color, ColorError> {
        Color::from_hsla(hue, saturation, lightness, 1.0)
    }

    /// Builds a color from HSL components and an alpha in [0, 1].
    ///
    /// The stored HSL is recomputed from the resulting RGB, so degenerate
    /// inputs normalize: `hsl(0, 100%, 0%)` is black with saturation 0.
    pub fn from_hsla(
        hue: u16,
        saturation: u8,
        lightness: u8,
        alpha: f64,
    ) -> Result<Color, ColorError> {
        if hue >= 360 {
            return Err(ColorError::InvalidColor(format!(
                "hue {hue} outside [0, 360)"
            )));
        }
        if saturation > 100 || lightness > 100 {
            return Err(ColorError::InvalidColor(format!(
                "saturation {saturation}% or lightness {lightness}% above 100%"
            )));
        }
        let (red, green, blue) = hsl_to_rgb(hue, saturation, lightness);
        Color::from_rgba(red, green, blue, alpha)
    }

    /// Returns `"#RRGGBB"`, or `"#RRGGBBAA"` when `include_alpha` is set.
    pub fn to_hex(self, include_alpha: bool) -> String {
        if include_alpha {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.red,
                self.green,
                self.blue,
                self.alpha_byte()
            )
        } else {
            format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
        }
    }

    /// Alpha scaled to a byte, rounding half up.
    pub fn alpha_byte(self) -> u8 {
        (self.alpha * 255.0).round() as u8
    }

    /// True when alpha is below 1.
    pub fn is_translucent(self) -> bool {
        self.alpha < 1.0
    }

    pub fn red(self) -> u8 {
        self.red
    }

    pub fn green(self) -> u8 {
        self.green
    }

    pub fn blue(self) -> u8 {
        self.blue
    }

    pub fn alpha(self) -> f64 {
        self.alpha
    }

    /// Hue in whole degrees, 0 to 359.
    pub fn hue(self) -> u16 {
        self.hue
    }

    /// Saturation in whole percent.
    pub fn saturation(self) -> u8 {
        self.saturation
    }

    /// Lightness in whole percent.
    pub fn lightness(self) -> u8 {
        self.lightness
    }
}

fn check_alpha(alpha: f64) -> Result<f64, ColorError> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(ColorError::InvalidColor(format!(
            "alpha {alpha} outside [0, 1]"
        )))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex(self.is_translucent()))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Converts 8-bit RGB to integer `(hue, saturation, lightness)`.
///
/// Hue is in [0, 360); a hue that rounds up to 360 wraps to 0. Achromatic
/// inputs (all channels equal) have hue and saturation 0.
pub fn rgb_to_hsl(red: u8, green: u8, blue: u8) -> (u16, u8, u8) {
    let r = red as f64 / 255.0;
    let g = green as f64 / 255.0;
    let b = blue as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    let (hue, saturation) = if max == min {
        (0.0, 0.0)
    } else {
        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let sextant = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (sextant / 6.0, saturation)
    };

    (
        (hue * 360.0).round() as u16 % 360,
        (saturation * 100.0).round() as u8,
        (lightness * 100.0).round() as u8,
    )
}

/// Converts integer HSL (degrees, percent, percent) to 8-bit RGB.
///
/// Only defined for hue in [0, 360) and percentages in [0, 100].
pub fn hsl_to_rgb(hue: u16, saturation: u8, lightness: u8) -> (u8, u8, u8) {
    let h = hue as f64 / 360.0;
    let s = saturation as f64 / 100.0;
    let l = lightness as f64 / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    (to_byte(r), to_byte(g), to_byte(b))
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}
