//! The owned, ordered container passed between pipeline stages.
//!
//! Every transformation returns a fresh collection, so a caller that holds on
//! to an earlier stage's result keeps seeing the same colors.

use crate::color::Color;
use crate::dedup::dedup;
use crate::export::Export;
use crate::format::Format;
use crate::sort::{sort, SortSpec};
use serde::{Deserialize, Serialize};

/// Ordered sequence of colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorCollection {
    colors: Vec<Color>,
}

impl ColorCollection {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }

    pub fn into_vec(self) -> Vec<Color> {
        self.colors
    }

    /// Copy with duplicate RGBA values removed, first occurrence kept.
    pub fn dedup(&self) -> Self {
        Self::new(dedup(&self.colors))
    }

    /// Copy ordered by `spec`.
    pub fn sorted(&self, spec: &SortSpec) -> Self {
        Self::new(sort(&self.colors, spec))
    }

    /// Copy in reverse order.
    pub fn reversed(&self) -> Self {
        self.colors.iter().rev().copied().collect()
    }

    /// Each color rendered in `format`.
    pub fn formatted_values(&self, format: Format) -> Vec<String> {
        self.colors.iter().map(|&c| format.apply(c)).collect()
    }

    /// All colors rendered in `format`, joined with `", "`.
    pub fn join(&self, format: Format) -> String {
        self.formatted_values(format).join(", ")
    }

    /// Structured record of every color.
    pub fn export(&self) -> Export {
        Export::new(&self.colors)
    }
}

impl From<Vec<Color>> for ColorCollection {
    fn from(colors: Vec<Color>) -> Self {
        Self::new(colors)
    }
}

impl FromIterator<Color> for ColorCollection {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ColorCollection {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}
