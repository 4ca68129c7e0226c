//! Error types for colorsort.

use thiserror::Error;

/// Errors produced by color construction, formatting and layout.
///
/// Malformed input *text* never produces one of these: the parser swallows
/// `InvalidColor` and counts the token as discarded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    /// A color token or component was outside the valid range for its space.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A format tag was not one of the supported notations.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A sort key name did not match any color attribute.
    #[error("unsupported sort key: {0}")]
    UnsupportedSortKey(String),

    /// Viewport width or height was zero when sizing the swatch grid.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,
}
