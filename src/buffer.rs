//! Raw pixel buffer type shared by every pipeline stage.
//!
//! A [`PixelBuffer`] is a validated, owned block of interleaved 8-bit
//! pixel data (RGB or RGBA). All validation happens at construction,
//! so downstream stages can index freely without re-checking bounds.

use thiserror::Error;

/// Alpha values below this are treated as fully transparent.
///
/// Translucent pixels are excluded from palette sampling and bypass
/// dithering entirely (they come out with alpha 0).
pub const TRANSLUCENCY_THRESHOLD: u8 = 10;

/// Errors from constructing a [`PixelBuffer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The data length does not match `width * height * channels`.
    #[error("buffer length {actual} does not match {width}x{height}x{channels} ({expected} bytes)")]
    LengthMismatch {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },

    /// Only 3 (RGB) and 4 (RGBA) channel layouts are supported.
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(u8),

    /// Width or height is zero.
    #[error("zero-area image ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
}

/// An owned, interleaved 8-bit pixel buffer.
///
/// Pixels are stored row-major: the pixel at `(x, y)` starts at byte
/// offset `(y * width + x) * channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps existing pixel data, validating dimensions and length.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroArea { width, height });
        }
        if channels != 3 && channels != 4 {
            return Err(BufferError::UnsupportedChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Internal constructor for stages that compute dimensions themselves.
    ///
    /// Callers must uphold the `new` invariants.
    pub(crate) fn from_parts(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * channels as usize
        );
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Allocates a buffer filled with a single repeated pixel.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self, BufferError> {
        let channels = pixel.len() as u8;
        if channels != 3 && channels != 4 {
            return Err(BufferError::UnsupportedChannels(channels));
        }
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroArea { width, height });
        }
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * pixel.len());
        for _ in 0..count {
            data.extend_from_slice(pixel);
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels per pixel: 3 (RGB) or 4 (RGBA).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// The longer of the two dimensions.
    pub fn long_edge(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning the raw bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// The RGB components of the pixel at `(x, y)`.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.pixel_index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// The alpha of the pixel at `(x, y)`, or 255 for RGB buffers.
    #[inline]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if self.channels == 4 {
            let i = self.pixel_index(x, y);
            self.data[i + 3]
        } else {
            255
        }
    }

    /// Whether the pixel at `(x, y)` counts as transparent.
    #[inline]
    pub fn is_translucent(&self, x: u32, y: u32) -> bool {
        self.alpha_at(x, y) < TRANSLUCENCY_THRESHOLD
    }
}
