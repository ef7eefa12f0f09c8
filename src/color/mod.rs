//! Color types and conversions.
//!
//! The pipeline works in 8-bit sRGB throughout. [`Rgb`] is the storage
//! type for palette entries; the [`hls`] module provides the cylindrical
//! HLS representation used by the channel-override filters.

mod hls;
mod rgb;

pub use hls::{hls_to_rgb, rgb_to_hls};
pub use rgb::Rgb;

use thiserror::Error;

/// Errors from parsing a hex color string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string is not 3 or 6 hex digits (after stripping `#`).
    #[error("hex color must be 3 or 6 digits")]
    InvalidLength,

    /// A character was not a valid hex digit.
    #[error("invalid hex digit: {0}")]
    InvalidHex(#[from] std::num::ParseIntError),
}

/// Rec. 601 luma from 8-bit RGB, rounded to the nearest integer.
///
/// Uses the classic 0.30 / 0.59 / 0.11 weights.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.30 * r as f32 + 0.59 * g as f32 + 0.11 * b as f32).round() as u8
}
