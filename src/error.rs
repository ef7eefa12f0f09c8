//! Crate-level error type.

use thiserror::Error;

use crate::buffer::BufferError;
use crate::color::ParseColorError;
use crate::palette::PaletteError;

/// Unified error for fallible pipeline entry points.
///
/// The individual stages keep their own narrow error types; this enum
/// exists so application code can `?` across all of them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pixel buffer: {0}")]
    Buffer(#[from] BufferError),

    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_stage_errors() {
        let buffer_err: Error = BufferError::UnsupportedChannels(1).into();
        assert!(matches!(buffer_err, Error::Buffer(_)));

        let palette_err: Error = PaletteError::Empty.into();
        assert!(matches!(palette_err, Error::Palette(_)));

        let parse_err: Error = "nope".parse::<crate::Rgb>().unwrap_err().into();
        assert!(matches!(parse_err, Error::ParseColor(_)));
    }

    #[test]
    fn messages_include_cause() {
        let err: Error = BufferError::ZeroArea { width: 0, height: 4 }.into();
        assert_eq!(
            err.to_string(),
            "invalid pixel buffer: zero-area image (0x4)"
        );
    }
}
