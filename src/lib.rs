//! pixelette: convert photos and drawings into pixel art.
//!
//! The crate chains five stages into a deterministic pipeline:
//!
//! ```text
//! RGB(A) bytes
//!     |
//!     v
//! [tone filters]      grayscale, invert, HLS overrides, contrast/brightness
//!     |
//!     v
//! [morphology]        erode/dilate to thicken or thin line art
//!     |
//!     v
//! [downsample]        block pooling to the target pixel grid
//!     |
//!     v
//! [palette]           seeded k-means extraction (or a locked palette)
//!     |
//!     v
//! [dither]            nearest / ordered Bayer / error diffusion
//! ```
//!
//! # Quick Start
//!
//! The [`Pipeline`] driven by a [`FilterConfig`] is the primary entry
//! point:
//!
//! ```
//! use pixelette::{DitherKind, FilterConfig, Pipeline, PixelBuffer};
//!
//! let config = FilterConfig {
//!     pixel_length: 16,
//!     color_levels: 2,
//!     dither_kind: DitherKind::Atkinson,
//!     ..FilterConfig::default()
//! };
//!
//! let buf = PixelBuffer::filled(64, 64, &[120, 80, 200]).unwrap();
//! let output = Pipeline::new(config).run(buf);
//!
//! assert_eq!(output.buffer.width(), 16);
//! assert_eq!(output.palette.len(), 4);
//! ```
//!
//! # Individual Stages
//!
//! Every stage is also usable on its own: [`filter`] for tone and
//! morphology, [`resample::downsample`] for the pixel grid,
//! [`PaletteExtractor`] for k-means, and [`dither::dither`] for
//! quantization against any [`Palette`].
//!
//! # Determinism
//!
//! A pipeline run is a pure function of the input pixels and the
//! config. Dithering scans in strict raster order and the k-means
//! seeding RNG comes from [`FilterConfig::seed`], so identical inputs
//! always produce identical outputs.
//!
//! # Transparency
//!
//! RGBA inputs are supported; pixels with alpha below
//! [`buffer::TRANSLUCENCY_THRESHOLD`] are excluded from palette
//! sampling and bypass dithering (they come out fully transparent).

pub mod buffer;
pub mod color;
pub mod dither;
pub mod error;
pub mod filter;
pub mod palette;
pub mod pipeline;
pub mod resample;


pub use buffer::{BufferError, PixelBuffer};
pub use color::{ParseColorError, Rgb};
pub use dither::{DitherKind, DitherOptions};
pub use error::Error;
pub use palette::{Palette, PaletteError, PaletteExtractor};
pub use pipeline::{FilterConfig, Pipeline, PipelineOutput};
pub use resample::PoolingMode;
