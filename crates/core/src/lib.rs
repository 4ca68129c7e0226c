#![deny(unsafe_code)]
//! Core types for colorsort: pull colors out of free-form text, normalize
//! them, and reorder them by numeric attributes.
//!
//! Provides the `Color` value type with hex/RGB/HSL conversion, the text
//! `parser`, alpha-aware `dedup`, stable multi-key `sort`, `Format` output
//! notations, the structured `Export`, swatch `layout` sizing, and the
//! `PipelineOptions` that tie them together.

pub mod collection;
pub mod color;
pub mod dedup;
pub mod error;
pub mod export;
pub mod format;
pub mod layout;
pub mod parser;
pub mod pipeline;
pub mod sort;

pub use collection::ColorCollection;
pub use color::Color;
pub use error::ColorError;
pub use export::{ColorRecord, Export};
pub use format::Format;
pub use layout::{swatch_grid, SwatchGrid};
pub use parser::{parse, Parsed};
pub use pipeline::{PipelineOptions, PipelineOutput};
pub use sort::{SortCriterion, SortKey, SortSpec};
