//! The full parse, dedup, sort, format cycle.
//!
//! [`PipelineOptions`] is plain serde data so the same settings can come
//! from command-line flags or a JSON file:
//!
//! ```json
//! {"dedup": true, "reverse": false, "format": "rgb",
//!  "sort": [{"sort": "hue", "asc": true}, {"sort": "lightness"}]}
//! ```
//!
//! Missing fields fall back to their defaults.

use crate::collection::ColorCollection;
use crate::export::Export;
use crate::format::Format;
use crate::parser::parse;
use crate::sort::SortSpec;
use serde::{Deserialize, Serialize};

/// Settings for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Drop repeated RGBA values before sorting.
    pub dedup: bool,
    /// Reverse the sorted order.
    pub reverse: bool,
    /// Notation for the joined text output.
    pub format: Format,
    pub sort: SortSpec,
}

/// What one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub colors: ColorCollection,
    /// Color-like tokens the parser rejected.
    pub discarded: usize,
    /// Colors in the requested format, joined with `", "`.
    pub text: String,
}

impl PipelineOptions {
    /// Parses `text` and applies dedup, sort, reverse and formatting.
    pub fn run(&self, text: &str) -> PipelineOutput {
        let parsed = parse(text);
        let found = parsed.colors.len();

        let colors = if self.dedup {
            parsed.colors.dedup()
        } else {
            parsed.colors
        };
        let colors = colors.sorted(&self.sort);
        let colors = if self.reverse {
            colors.reversed()
        } else {
            colors
        };

        tracing::debug!(
            found,
            kept = colors.len(),
            discarded = parsed.discarded,
            format = %self.format,
            "pipeline run complete"
        );

        PipelineOutput {
            text: colors.join(self.format),
            discarded: parsed.discarded,
            colors,
        }
    }

    /// Runs the pipeline and builds the structured export of the result.
    pub fn export(&self, text: &str) -> Export {
        self.run(text).colors.export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{SortCriterion, SortKey};

    #[test]
    fn default_options_sort_rgb_descending_as_hex() {
        let out = PipelineOptions::default().run("#ffaa00 #00ffaa #aa00ff");
        assert_eq!(out.text, "#FFAA00, #AA00FF, #00FFAA");
        assert_eq!(out.discarded, 0);
    }

    #[test]
    fn dedup_runs_before_sort() {
        let options = PipelineOptions {
            dedup: true,
            ..Default::default()
        };
        let out = options.run("#000000 #000000 #FFFFFF");
        assert_eq!(out.text, "#FFFFFF, #000000");
    }

    #[test]
    fn dedup_keeps_distinct_alphas() {
        let options = PipelineOptions {
            dedup: true,
            format: Format::Rgba,
            ..Default::default()
        };
        let out = options.run("rgba(0, 0, 0, 0.5) rgba(0, 0, 0, 1)");
        assert_eq!(out.colors.len(), 2);
        assert_eq!(out.text, "rgba(0, 0, 0, 0.5), rgba(0, 0, 0, 1)");
    }

    #[test]
    fn reverse_flips_sorted_order() {
        let options = PipelineOptions {
            reverse: true,
            sort: SortSpec::new([SortCriterion::asc(SortKey::Lightness)]),
            ..Default::default()
        };
        let out = options.run("hsl(0, 0%, 50%) hsl(0, 0%, 10%) hsl(0, 0%, 90%)");
        assert_eq!(out.text, "#E6E6E6, #808080, #1A1A1A");
    }

    #[test]
    fn no_matches_is_an_empty_result() {
        let out = PipelineOptions::default().run("nothing to see");
        assert!(out.colors.is_empty());
        assert_eq!(out.text, "");
    }

    #[test]
    fn discarded_tokens_are_reported() {
        let out = PipelineOptions::default().run("rgb(999, 0, 0) #abc");
        assert_eq!(out.discarded, 1);
        assert_eq!(out.colors.len(), 1);
    }

    #[test]
    fn export_follows_pipeline_order() {
        let export = PipelineOptions::default().export("#000000 #ffffff");
        assert_eq!(export.hex_array, ["#FFFFFF", "#000000"]);
    }

    #[test]
    fn options_load_from_partial_json() {
        let json = r#"{"dedup": true, "format": "hsl", "sort": "hue:asc"}"#;
        let options: PipelineOptions = serde_json::from_str(json).unwrap();
        assert!(options.dedup);
        assert!(!options.reverse);
        assert_eq!(options.format, Format::Hsl);
        assert_eq!(options.sort.criteria(), &[SortCriterion::asc(SortKey::Hue)]);
    }

    #[test]
    fn empty_json_gives_defaults() {
        let options: PipelineOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, PipelineOptions::default());
    }

    #[test]
    fn options_json_round_trip() {
        let original = PipelineOptions {
            dedup: true,
            reverse: true,
            format: Format::Hsla,
            sort: SortSpec::new([
                SortCriterion::asc(SortKey::Saturation),
                SortCriterion::desc(SortKey::Alpha),
            ]),
        };
        let json = serde_json::to_string(&original).unwrap();
        let restored: PipelineOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
