//! Structured export of a color list, the payload behind the "download"
//! action.
//!
//! The JSON shape is:
//!
//! ```json
//! {
//!   "colors": [{"hex": "#FF0000", "rgb": "rgb(255, 0, 0)", "hsl": "hsl(0, 100%, 50%)",
//!               "red": 255, "green": 0, "blue": 0, "alpha": 1.0,
//!               "hue": 0, "saturation": 100, "lightness": 50}],
//!   "hexArray": ["#FF0000"],
//!   "rgbArray": ["rgb(255, 0, 0)"],
//!   "hslArray": ["hsl(0, 100%, 50%)"]
//! }
//! ```

use crate::color::Color;
use crate::format::Format;
use serde::{Deserialize, Serialize};

/// One color with its string forms and individual channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl From<Color> for ColorRecord {
    fn from(c: Color) -> Self {
        Self {
            hex: Format::Hex6.apply(c),
            rgb: Format::Rgb.apply(c),
            hsl: Format::Hsl.apply(c),
            red: c.red(),
            green: c.green(),
            blue: c.blue(),
            alpha: c.alpha(),
            hue: c.hue(),
            saturation: c.saturation(),
            lightness: c.lightness(),
        }
    }
}

/// Per-color records plus parallel hex, RGB and HSL string arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub colors: Vec<ColorRecord>,
    pub hex_array: Vec<String>,
    pub rgb_array: Vec<String>,
    pub hsl_array: Vec<String>,
}

impl Export {
    pub fn new(colors: &[Color]) -> Self {
        let colors: Vec<ColorRecord> = colors.iter().map(|&c| c.into()).collect();
        Self {
            hex_array: colors.iter().map(|r| r.hex.clone()).collect(),
            rgb_array: colors.iter().map(|r| r.rgb.clone()).collect(),
            hsl_array: colors.iter().map(|r| r.hsl.clone()).collect(),
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_carries_all_forms_and_channels() {
        let record = ColorRecord::from(Color::from_rgba(255, 0, 153, 0.5).unwrap());
        assert_eq!(record.hex, "#FF0099");
        assert_eq!(record.rgb, "rgb(255, 0, 153)");
        assert_eq!(record.hsl, "hsl(324, 100%, 50%)");
        assert_eq!((record.red, record.green, record.blue), (255, 0, 153));
        assert_eq!(record.alpha, 0.5);
        assert_eq!((record.hue, record.saturation, record.lightness), (324, 100, 50));
    }

    #[test]
    fn arrays_run_parallel_to_records() {
        let colors = [Color::from_rgb(0, 0, 0), Color::from_rgb(255, 255, 255)];
        let export = Export::new(&colors);
        assert_eq!(export.len(), 2);
        assert_eq!(export.hex_array, ["#000000", "#FFFFFF"]);
        assert_eq!(export.rgb_array, ["rgb(0, 0, 0)", "rgb(255, 255, 255)"]);
        assert_eq!(export.hsl_array, ["hsl(0, 0%, 0%)", "hsl(0, 0%, 100%)"]);
    }

    #[test]
    fn json_uses_camel_case_array_names() {
        let export = Export::new(&[Color::from_rgb(255, 0, 0)]);
        let v = serde_json::to_value(&export).unwrap();
        assert_eq!(v["hexArray"], json!(["#FF0000"]));
        assert_eq!(v["rgbArray"], json!(["rgb(255, 0, 0)"]));
        assert_eq!(v["hslArray"], json!(["hsl(0, 100%, 50%)"]));
        assert_eq!(v["colors"][0]["lightness"], json!(50));
        assert_eq!(v["colors"][0]["alpha"], json!(1.0));
    }

    #[test]
    fn empty_export_is_valid() {
        let export = Export::new(&[]);
        assert!(export.is_empty());
        let json = export.to_json_pretty().unwrap();
        let back: Export = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);
    }
}
