//! Swatch grid sizing for a viewport.
//!
//! Picks the fewest columns for which the swatches, each `width / columns`
//! tall, fit `count / columns` rows into the height. The fit test is monotone
//! in the column count, so the search starts at `ceil(sqrt(w * n / h))` and
//! only corrects for rounding.

use crate::error::ColorError;
use serde::{Deserialize, Serialize};

/// Grid dimensions, with cell sizes as percentages of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwatchGrid {
    pub columns: usize,
    pub rows: usize,
    pub column_width_pct: f64,
    pub row_height_pct: f64,
}

/// Sizes a grid for `count` swatches in a `width` × `height` viewport.
///
/// Returns `ColorError::InvalidDimensions` if either dimension is zero.
pub fn swatch_grid(count: usize, width: u32, height: u32) -> Result<SwatchGrid, ColorError> {
    if width == 0 || height == 0 {
        return Err(ColorError::InvalidDimensions);
    }
    let (w, h, n) = (width as f64, height as f64, count as f64);

    let fits = |columns: usize| (w / columns as f64) * (n / columns as f64) <= h;

    let mut columns = ((w * n / h).sqrt().ceil() as usize).max(1);
    while columns > 1 && fits(columns - 1) {
        columns -= 1;
    }
    while !fits(columns) {
        columns += 1;
    }

    let rows = count.div_ceil(columns).max(1);
    Ok(SwatchGrid {
        columns,
        rows,
        column_width_pct: 100.0 / columns as f64,
        row_height_pct: 100.0 / rows as f64,
    })
}
