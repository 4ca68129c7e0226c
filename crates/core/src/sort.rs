//! Multi-key stable sorting over color attributes.
//!
//! A [`SortSpec`] holds up to three [`SortCriterion`] values. Colors are
//! compared criterion by criterion, left to right, and the first non-equal
//! comparison decides. Full ties keep their input order.
//!
//! Sort specs built from loose text or JSON skip unknown key names instead
//! of failing, so a partially filled three-key form still sorts by the keys
//! it does name.

use crate::color::Color;
use crate::error::ColorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Maximum number of criteria in a [`SortSpec`].
pub const MAX_CRITERIA: usize = 3;

/// A sortable numeric attribute of a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Red,
    Green,
    Blue,
    Alpha,
    Hue,
    Saturation,
    Lightness,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Red,
        SortKey::Green,
        SortKey::Blue,
        SortKey::Alpha,
        SortKey::Hue,
        SortKey::Saturation,
        SortKey::Lightness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortKey::Red => "red",
            SortKey::Green => "green",
            SortKey::Blue => "blue",
            SortKey::Alpha => "alpha",
            SortKey::Hue => "hue",
            SortKey::Saturation => "saturation",
            SortKey::Lightness => "lightness",
        }
    }

    /// The projection this key sorts by.
    pub fn accessor(self) -> fn(Color) -> f64 {
        match self {
            SortKey::Red => |c: Color| f64::from(c.red()),
            SortKey::Green => |c: Color| f64::from(c.green()),
            SortKey::Blue => |c: Color| f64::from(c.blue()),
            SortKey::Alpha => |c: Color| c.alpha(),
            SortKey::Hue => |c: Color| f64::from(c.hue()),
            SortKey::Saturation => |c: Color| f64::from(c.saturation()),
            SortKey::Lightness => |c: Color| f64::from(c.lightness()),
        }
    }

    pub fn value(self, color: Color) -> f64 {
        self.accessor()(color)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ColorError::UnsupportedSortKey(wanted.to_string()))
    }
}

/// One ranked sort key with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortCriterion {
    #[serde(rename = "sort")]
    pub key: SortKey,
    #[serde(rename = "asc", default)]
    pub ascending: bool,
}

impl SortCriterion {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            ascending: true,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            ascending: false,
        }
    }

    pub fn compare(&self, a: Color, b: Color) -> Ordering {
        let value = self.key.accessor();
        if self.ascending {
            value(a).total_cmp(&value(b))
        } else {
            value(b).total_cmp(&value(a))
        }
    }
}

impl FromStr for SortCriterion {
    type Err = ColorError;

    /// Parses `key`, `key:asc` or `key:desc`. A bare key sorts descending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, dir)) => (key, Some(dir.trim())),
            None => (s, None),
        };
        let key: SortKey = key.parse()?;
        match direction.map(str::to_ascii_lowercase).as_deref() {
            None | Some("desc") | Some("descending") => Ok(SortCriterion::desc(key)),
            Some("asc") | Some("ascending") => Ok(SortCriterion::asc(key)),
            Some(other) => Err(ColorError::UnsupportedSortKey(format!(
                "{key}:{other}"
            ))),
        }
    }
}

/// Ordered list of up to [`MAX_CRITERIA`] criteria.
///
/// Defaults to red, green, blue, all descending. An empty spec compares
/// every pair as equal and so leaves the order untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    criteria: Vec<SortCriterion>,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            criteria: vec![
                SortCriterion::desc(SortKey::Red),
                SortCriterion::desc(SortKey::Green),
                SortCriterion::desc(SortKey::Blue),
            ],
        }
    }
}

impl SortSpec {
    /// Builds a spec from criteria, keeping only the first three.
    pub fn new(criteria: impl IntoIterator<Item = SortCriterion>) -> Self {
        let mut criteria: Vec<SortCriterion> = criteria.into_iter().collect();
        if criteria.len() > MAX_CRITERIA {
            tracing::warn!(
                given = criteria.len(),
                kept = MAX_CRITERIA,
                "ignoring extra sort criteria"
            );
            criteria.truncate(MAX_CRITERIA);
        }
        Self { criteria }
    }

    /// Builds a spec from loose terms such as `"red-green-blue"` or
    /// `"hue:asc, lightness"`. Terms are separated by `-`, `,` or whitespace.
    /// Unknown keys are skipped with a warning.
    pub fn parse_loose(text: &str) -> Self {
        let terms = text
            .split(|c: char| c == '-' || c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());
        Self::from_terms(terms)
    }

    /// Builds a spec from individual `key[:asc|:desc]` terms, skipping any
    /// that do not parse.
    pub fn from_terms<'a>(terms: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(terms.into_iter().filter_map(|term| match term.parse::<SortCriterion>() {
            Ok(criterion) => Some(criterion),
            Err(e) => {
                tracing::warn!(term, error = %e, "skipping sort criterion");
                None
            }
        }))
    }

    pub fn criteria(&self) -> &[SortCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Compares two colors by each criterion in turn.
    pub fn compare(&self, a: Color, b: Color) -> Ordering {
        self.criteria
            .iter()
            .map(|c| c.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Returns a new vector of `colors` ordered by `spec`. The sort is stable.
pub fn sort(colors: &[Color], spec: &SortSpec) -> Vec<Color> {
    let mut sorted = colors.to_vec();
    sorted.sort_by(|a, b| spec.compare(*a, *b));
    sorted
}

impl Serialize for SortSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.criteria.serialize(serializer)
    }
}

/// Loose wire form: `"green"`, `"red-green-blue"`, or
/// `[{"sort": "red", "asc": true}, ...]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpec {
    Terms(String),
    List(Vec<RawCriterion>),
}

#[derive(Deserialize)]
struct RawCriterion {
    sort: String,
    #[serde(default)]
    asc: bool,
}

impl<'de> Deserialize<'de> for SortSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSpec::deserialize(deserializer)? {
            RawSpec::Terms(text) => SortSpec::parse_loose(&text),
            RawSpec::List(raw) => SortSpec::new(raw.into_iter().filter_map(|r| {
                match r.sort.parse::<SortKey>() {
                    Ok(key) => Some(SortCriterion {
                        key,
                        ascending: r.asc,
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping sort criterion");
                        None
                    }
                }
            })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(hexes: &[&str]) -> Vec<Color> {
        hexes.iter().map(|h| Color::from_hex(h).unwrap()).collect()
    }

    fn hexes(colors: &[Color]) -> Vec<String> {
        colors.iter().map(|c| c.to_hex(false)).collect()
    }

    #[test]
    fn default_sorts_red_green_blue_descending() {
        let input = colors(&["#ffaa00", "#00ffaa", "#aa00ff"]);
        let out = sort(&input, &SortSpec::default());
        assert_eq!(hexes(&out), ["#FFAA00", "#AA00FF", "#00FFAA"]);
    }

    #[test]
    fn single_key_defaults_to_descending() {
        let input = colors(&["#ffaa00", "#00ffaa", "#aa00ff"]);
        let out = sort(&input, &SortSpec::parse_loose("green"));
        assert_eq!(hexes(&out), ["#00FFAA", "#FFAA00", "#AA00FF"]);
    }

    #[test]
    fn green_ascending_follows_channel_values() {
        let input = colors(&["#ffaa00", "#00ffaa", "#aa00ff"]);
        let spec = SortSpec::new([SortCriterion::asc(SortKey::Green)]);
        assert_eq!(hexes(&sort(&input, &spec)), ["#AA00FF", "#FFAA00", "#00FFAA"]);
    }

    #[test]
    fn red_ascending() {
        let input = colors(&["#ffaa00", "#00ffaa", "#aa00ff"]);
        let spec = SortSpec::parse_loose("red:asc");
        assert_eq!(hexes(&sort(&input, &spec)), ["#00FFAA", "#AA00FF", "#FFAA00"]);
    }

    #[test]
    fn multiple_criteria_break_ties_left_to_right() {
        let input = colors(&["#ffffaa", "#aaaa00", "#ffaa00", "#ff0000"]);
        let spec = SortSpec::parse_loose("red-green");
        assert_eq!(
            hexes(&sort(&input, &spec)),
            ["#FFFFAA", "#FFAA00", "#FF0000", "#AAAA00"]
        );

        let spec = SortSpec::parse_loose("red, green:asc");
        assert_eq!(
            hexes(&sort(&input, &spec)),
            ["#FF0000", "#FFAA00", "#FFFFAA", "#AAAA00"]
        );
    }

    #[test]
    fn sort_leaves_input_untouched() {
        let input = colors(&["#000000", "#ffffff"]);
        let before = input.clone();
        let _ = sort(&input, &SortSpec::default());
        assert_eq!(input, before);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let opaque = Color::from_rgb(10, 10, 10);
        let translucent = Color::from_rgba(10, 10, 10, 0.5).unwrap();
        let out = sort(&[translucent, opaque], &SortSpec::default());
        assert_eq!(out, vec![translucent, opaque]);
    }

    #[test]
    fn alpha_key_orders_by_transparency() {
        let opaque = Color::from_rgb(0, 0, 0);
        let translucent = Color::from_rgba(0, 0, 0, 0.25).unwrap();
        let spec = SortSpec::new([SortCriterion::asc(SortKey::Alpha)]);
        assert_eq!(sort(&[opaque, translucent], &spec), vec![translucent, opaque]);
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let spec = SortSpec::parse_loose("chroma-hue:asc-banana");
        assert_eq!(spec.criteria(), &[SortCriterion::asc(SortKey::Hue)]);
    }

    #[test]
    fn empty_spec_keeps_order() {
        let input = colors(&["#000000", "#ffffff", "#888888"]);
        let spec = SortSpec::parse_loose("nothing useful");
        assert!(spec.is_empty());
        assert_eq!(sort(&input, &spec), input);
    }

    #[test]
    fn spec_keeps_at_most_three_criteria() {
        let spec = SortSpec::parse_loose("hue saturation lightness alpha");
        assert_eq!(spec.criteria().len(), MAX_CRITERIA);
        assert_eq!(spec.criteria()[2].key, SortKey::Lightness);
    }

    #[test]
    fn sort_key_parsing_is_case_insensitive_and_strict() {
        assert_eq!("Saturation".parse::<SortKey>().unwrap(), SortKey::Saturation);
        assert_eq!(
            "chroma".parse::<SortKey>(),
            Err(ColorError::UnsupportedSortKey("chroma".into()))
        );
    }

    #[test]
    fn criterion_rejects_unknown_direction() {
        assert!("red:sideways".parse::<SortCriterion>().is_err());
        assert_eq!(
            "blue:ASC".parse::<SortCriterion>().unwrap(),
            SortCriterion::asc(SortKey::Blue)
        );
    }

    #[test]
    fn deserializes_criterion_list_skipping_unknown_keys() {
        let json = r#"[{"sort": "red"}, {"sort": "bogus", "asc": true}, {"sort": "green", "asc": true}]"#;
        let spec: SortSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            spec.criteria(),
            &[
                SortCriterion::desc(SortKey::Red),
                SortCriterion::asc(SortKey::Green)
            ]
        );
    }

    #[test]
    fn deserializes_plain_string() {
        let spec: SortSpec = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(spec.criteria(), &[SortCriterion::desc(SortKey::Blue)]);
    }

    #[test]
    fn serializes_as_criterion_list() {
        let json = serde_json::to_value(SortSpec::new([SortCriterion::asc(SortKey::Hue)])).unwrap();
        assert_eq!(json, serde_json::json!([{"sort": "hue", "asc": true}]));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn color() -> impl Strategy<Value = Color> {
            (any::<u8>(), any::<u8>(), any::<u8>(), 0u8..=4)
                .prop_map(|(r, g, b, a)| Color::from_rgba(r, g, b, a as f64 / 4.0).unwrap())
        }

        fn spec() -> impl Strategy<Value = SortSpec> {
            prop::collection::vec((0usize..7, any::<bool>()), 0..=3).prop_map(|picks| {
                SortSpec::new(picks.into_iter().map(|(i, ascending)| SortCriterion {
                    key: SortKey::ALL[i],
                    ascending,
                }))
            })
        }

        proptest! {
            #[test]
            fn sorting_sorted_input_is_identity(
                input in prop::collection::vec(color(), 0..30),
                spec in spec(),
            ) {
                let once = sort(&input, &spec);
                prop_assert_eq!(sort(&once, &spec), once);
            }

            #[test]
            fn output_is_ordered_by_spec(
                input in prop::collection::vec(color(), 0..30),
                spec in spec(),
            ) {
                let out = sort(&input, &spec);
                prop_assert_eq!(out.len(), input.len());
                for pair in out.windows(2) {
                    prop_assert!(spec.compare(pair[0], pair[1]).is_le());
                }
            }
        }
    }
}
