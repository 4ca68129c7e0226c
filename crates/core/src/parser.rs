//! Extracts color tokens from free-form text.
//!
//! Three syntaxes are recognized, case-insensitively:
//!
//! - hex: `#` followed by a run of 3 to 8 hex digits; runs of 5 or 7 are
//!   malformed and discarded
//! - `rgb(...)` / `rgba(...)` with 0–255 integers or percentages, optional alpha
//! - `hsl(...)` / `hsla(...)` with integer degrees and percentages, optional alpha
//!
//! Each syntax is scanned independently and the results are concatenated
//! group by group: every hex match in text order, then every RGB match, then
//! every HSL match. This is *not* document order; downstream default sorting
//! has always seen colors in this grouping, so it is kept.
//!
//! Tokens that look like colors but fail validation (`rgb(300, 0, 0)`) are
//! dropped and counted, never reported as errors.

use crate::collection::ColorCollection;
use crate::color::Color;
use crate::error::ColorError;
use regex::{Captures, Regex};
use std::str::FromStr;
use std::sync::LazyLock;

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#([0-9a-f]{3,8})").expect("hex pattern is valid")
});

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)rgba?\(\s*([0-9]{1,3}%?)\s*,\s*([0-9]{1,3}%?)\s*,\s*([0-9]{1,3}%?)\s*(?:,\s*([0-9]*\.?[0-9]+%?)\s*)?\)",
    )
    .expect("rgb pattern is valid")
});

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)hsla?\(\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})%\s*,\s*([0-9]{1,3})%\s*(?:,\s*([0-9]*\.?[0-9]+%?)\s*)?\)",
    )
    .expect("hsl pattern is valid")
});

/// The textual color syntaxes, in the order their matches are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Hex,
    Rgb,
    Hsl,
}

impl Syntax {
    const SCAN_ORDER: [Syntax; 3] = [Syntax::Hex, Syntax::Rgb, Syntax::Hsl];

    fn regex(self) -> &'static Regex {
        match self {
            Syntax::Hex => &HEX_RE,
            Syntax::Rgb => &RGB_RE,
            Syntax::Hsl => &HSL_RE,
        }
    }

    fn build(self, caps: &Captures<'_>) -> Result<Color, ColorError> {
        match self {
            Syntax::Hex => Color::from_hex(&caps[1]),
            Syntax::Rgb => {
                let alpha = caps.get(4).map_or(Ok(1.0), |m| parse_alpha(m.as_str()))?;
                Color::from_rgba(
                    parse_channel(&caps[1])?,
                    parse_channel(&caps[2])?,
                    parse_channel(&caps[3])?,
                    alpha,
                )
            }
            Syntax::Hsl => {
                let alpha = caps.get(4).map_or(Ok(1.0), |m| parse_alpha(m.as_str()))?;
                Color::from_hsla(
                    parse_hue(&caps[1])?,
                    parse_percent(&caps[2])?,
                    parse_percent(&caps[3])?,
                    alpha,
                )
            }
        }
    }
}

/// Result of scanning a text blob.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// Valid colors, grouped hex, then RGB, then HSL.
    pub colors: ColorCollection,
    /// Color-like tokens that failed validation.
    pub discarded: usize,
}

/// Scans `text` for color tokens and converts every valid one.
///
/// Never fails: text without colors yields an empty collection.
pub fn parse(text: &str) -> Parsed {
    let mut colors = Vec::new();
    let mut discarded = 0;

    for syntax in Syntax::SCAN_ORDER {
        for caps in syntax.regex().captures_iter(text) {
            match syntax.build(&caps) {
                Ok(color) => colors.push(color),
                Err(e) => {
                    discarded += 1;
                    tracing::debug!(token = &caps[0], error = %e, "discarding color-like token");
                }
            }
        }
    }

    Parsed {
        colors: ColorCollection::new(colors),
        discarded,
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parses exactly one color token in any supported syntax, ignoring
    /// surrounding whitespace. Hex input may omit the `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        for syntax in Syntax::SCAN_ORDER {
            if let Some(caps) = syntax.regex().captures(token) {
                if caps[0].len() == token.len() {
                    return syntax.build(&caps);
                }
            }
        }
        if !token.starts_with('#') {
            if let Ok(color) = Color::from_hex(token) {
                return Ok(color);
            }
        }
        Err(ColorError::InvalidColor(format!("unrecognized color {token:?}")))
    }
}

/// An RGB channel: an integer in [0, 255] or a percentage in [0, 100].
fn parse_channel(s: &str) -> Result<u8, ColorError> {
    if let Some(pct) = s.strip_suffix('%') {
        let pct = parse_percent(pct)?;
        Ok((pct as f64 * 255.0 / 100.0).round() as u8)
    } else {
        let value: u16 = s
            .parse()
            .map_err(|e| ColorError::InvalidColor(format!("bad channel {s:?}: {e}")))?;
        u8::try_from(value)
            .map_err(|_| ColorError::InvalidColor(format!("channel {value} above 255")))
    }
}

fn parse_percent(s: &str) -> Result<u8, ColorError> {
    let value: u16 = s
        .parse()
        .map_err(|e| ColorError::InvalidColor(format!("bad percentage {s:?}: {e}")))?;
    if value > 100 {
        return Err(ColorError::InvalidColor(format!(
            "percentage {value} above 100"
        )));
    }
    Ok(value as u8)
}

/// Hue in degrees. 360 is the same angle as 0.
fn parse_hue(s: &str) -> Result<u16, ColorError> {
    let value: u16 = s
        .parse()
        .map_err(|e| ColorError::InvalidColor(format!("bad hue {s:?}: {e}")))?;
    match value {
        360 => Ok(0),
        v if v < 360 => Ok(v),
        v => Err(ColorError::InvalidColor(format!("hue {v} above 360"))),
    }
}

/// Alpha as a decimal in [0, 1] or a percentage. Range is checked by the
/// color constructors.
fn parse_alpha(s: &str) -> Result<f64, ColorError> {
    let (number, scale) = match s.strip_suffix('%') {
        Some(pct) => (pct, 100.0),
        None => (s, 1.0),
    };
    number
        .parse::<f64>()
        .map(|v| v / scale)
        .map_err(|e| ColorError::InvalidColor(format!("bad alpha {s:?}: {e}")))
}
