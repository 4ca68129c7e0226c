//! Rendering a [`Color`] back to text.

use crate::color::Color;
use crate::error::ColorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Output notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// `#RRGGBB`
    #[default]
    Hex6,
    /// `#RRGGBBAA`
    Hex8,
    /// `rgb(r, g, b)`
    Rgb,
    /// `rgba(r, g, b, a)`
    Rgba,
    /// `hsl(h, s%, l%)`
    Hsl,
    /// `hsla(h, s%, l%, a)`
    Hsla,
}

impl Format {
    pub const ALL: [Format; 6] = [
        Format::Hex6,
        Format::Hex8,
        Format::Rgb,
        Format::Rgba,
        Format::Hsl,
        Format::Hsla,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Format::Hex6 => "hex6",
            Format::Hex8 => "hex8",
            Format::Rgb => "rgb",
            Format::Rgba => "rgba",
            Format::Hsl => "hsl",
            Format::Hsla => "hsla",
        }
    }

    /// Renders `color` in this notation.
    pub fn apply(self, color: Color) -> String {
        match self {
            Format::Hex6 => color.to_hex(false),
            Format::Hex8 => color.to_hex(true),
            Format::Rgb => format!("rgb({}, {}, {})", color.red(), color.green(), color.blue()),
            Format::Rgba => format!(
                "rgba({}, {}, {}, {})",
                color.red(),
                color.green(),
                color.blue(),
                alpha_text(color.alpha())
            ),
            Format::Hsl => format!(
                "hsl({}, {}%, {}%)",
                color.hue(),
                color.saturation(),
                color.lightness()
            ),
            Format::Hsla => format!(
                "hsla({}, {}%, {}%, {})",
                color.hue(),
                color.saturation(),
                color.lightness(),
                alpha_text(color.alpha())
            ),
        }
    }
}

/// Alpha rounded to two decimals, trailing zeros dropped (`1`, `0.5`, `0.25`).
fn alpha_text(alpha: f64) -> String {
    let rounded = (alpha * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Renders `color` using a format tag such as `"rgb"`.
///
/// Returns `ColorError::UnsupportedFormat` for an unknown tag.
pub fn format_color(color: Color, tag: &str) -> Result<String, ColorError> {
    Ok(tag.parse::<Format>()?.apply(color))
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ColorError;

    /// Case insensitive; `hex` is accepted as an alias for `hex6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("hex") {
            return Ok(Format::Hex6);
        }
        Format::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ColorError::UnsupportedFormat(tag.to_string()))
    }
}

impl Serialize for Format {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Format {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
