//! Palette management and extraction.
//!
//! A [`Palette`] is the fixed set of output colors every pixel snaps to
//! during quantization. Palettes come from two places: supplied by the
//! caller (hex strings or [`Rgb`](crate::Rgb) values), or extracted
//! from the image itself by [`PaletteExtractor`]'s k-means clustering.

mod error;
mod extract;
mod palette;

pub use error::PaletteError;
pub use extract::PaletteExtractor;
pub use palette::Palette;
