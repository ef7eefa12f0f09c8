//! Palette error types.

use thiserror::Error;

use crate::color::ParseColorError;

/// Errors from constructing or editing a [`Palette`](super::Palette).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// A palette must contain at least one color.
    #[error("palette must contain at least one color")]
    Empty,

    /// An edit addressed a slot past the end of the palette.
    #[error("palette index {index} out of bounds (palette has {len} colors)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A hex color string failed to parse.
    #[error(transparent)]
    ParseColor(#[from] ParseColorError),
}
