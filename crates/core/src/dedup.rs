//! Duplicate removal by full RGBA identity.

use crate::color::Color;
use std::collections::HashSet;

/// Returns the colors with duplicates removed, first occurrence wins.
///
/// Identity is the 8-digit hex string, so colors that differ only in alpha
/// are kept apart. Survivors keep their input order.
pub fn dedup(colors: &[Color]) -> Vec<Color> {
    let mut seen = HashSet::with_capacity(colors.len());
    colors
        .iter()
        .copied()
        .filter(|c| seen.insert(c.to_hex(true)))
        .collect()
}
