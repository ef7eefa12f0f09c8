//! The full image-to-pixel-art pipeline.
//!
//! [`Pipeline`] chains the individual stages in a fixed order:
//!
//! ```text
//! tone filters -> morphology -> downsample -> palette -> dither
//! ```
//!
//! Every stage is gated by its [`FilterConfig`] flag, and the whole run
//! is a pure function of the configuration and the input pixels. The
//! same image and config always produce the same output, including the
//! k-means palette (which is seeded from the config).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::dither::{dither, DitherKind, DitherOptions};
use crate::error::Error;
use crate::filter;
use crate::palette::{Palette, PaletteExtractor};
use crate::resample::{downsample, PoolingMode};

/// Long-edge cap for the buffer fed to k-means.
///
/// Palette extraction on a multi-megapixel image is pure waste: the
/// cluster centroids converge to the same place on a 200px preview. The
/// pipeline averages the image down to this size for sampling only; the
/// full-resolution buffer is what gets dithered.
const SAMPLE_LONG_EDGE: u32 = 200;

/// Complete stage configuration for one pipeline run.
///
/// Field names serialize in camelCase so configs round-trip with the
/// browser front end unchanged. `#[serde(default)]` keeps old saved
/// configs loading when fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Replace every pixel with its luma.
    pub grayscale: bool,
    /// Invert RGB channels.
    pub invert_color: bool,

    /// Force every pixel's hue to `hue`.
    pub is_hue: bool,
    /// Hue constant, 0..=179 (degrees halved).
    pub hue: u8,
    /// Force every pixel's lightness to `luminance`.
    pub is_luminance: bool,
    pub luminance: u8,
    /// Force every pixel's saturation to `saturation`.
    pub is_saturation: bool,
    pub saturation: u8,

    /// Apply contrast scaling.
    pub contrast: bool,
    /// Contrast factor, 1.0 is neutral.
    pub contrast_level: f32,
    /// Apply a brightness offset.
    pub brightness: bool,
    /// Brightness offset added after contrast, 0 is neutral.
    pub brightness_level: i16,

    /// Apply morphological line-weight adjustment.
    pub edge_enhancement: bool,
    /// Signed kernel diameter: positive thickens dark lines (erosion),
    /// negative thins them (dilation).
    pub white_size: i32,

    /// Target long edge for downsampling; 0 disables the stage.
    pub pixel_length: u32,
    /// How source blocks collapse during downsampling.
    pub pooling: PoolingMode,

    /// Palette size exponent: the extracted palette has `2^colorLevels`
    /// colors. Clamped to 1..=8.
    pub color_levels: u8,
    /// Dithering algorithm for the quantization stage.
    pub dither_kind: DitherKind,
    /// Dither intensity, 0.0..=1.0.
    pub dither_strength: f32,
    /// Seed for k-means centroid initialization.
    pub seed: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            grayscale: false,
            invert_color: false,
            is_hue: false,
            hue: 0,
            is_luminance: false,
            luminance: 128,
            is_saturation: false,
            saturation: 128,
            contrast: false,
            contrast_level: 1.0,
            brightness: false,
            brightness_level: 0,
            edge_enhancement: false,
            white_size: 0,
            pixel_length: 0,
            pooling: PoolingMode::default(),
            color_levels: 4,
            dither_kind: DitherKind::default(),
            dither_strength: 1.0,
            seed: 0,
        }
    }
}

/// Result of a pipeline run: the quantized image plus the palette that
/// was used, so callers can display or re-lock it.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub buffer: PixelBuffer,
    pub palette: Palette,
}

/// Runs the configured stage chain over pixel buffers.
///
/// # Example
///
/// ```
/// use pixelette::{FilterConfig, Pipeline, PixelBuffer};
///
/// let config = FilterConfig {
///     grayscale: true,
///     pixel_length: 8,
///     color_levels: 1,
///     ..FilterConfig::default()
/// };
/// let buf = PixelBuffer::filled(64, 32, &[180, 40, 40]).unwrap();
/// let output = Pipeline::new(config).run(buf);
/// assert_eq!(output.buffer.width(), 8);
/// assert_eq!(output.palette.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: FilterConfig,
}

impl Pipeline {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Run the full pipeline, extracting a palette from the image.
    pub fn run(&self, buf: PixelBuffer) -> PipelineOutput {
        let buf = self.apply_stages(buf);
        let palette = self.extract_palette(&buf);
        self.quantize(buf, palette)
    }

    /// Run the pipeline with a caller-supplied (locked) palette.
    ///
    /// Palette extraction is skipped entirely; the interactive use case
    /// is re-running the pipeline after the user edited palette slots.
    pub fn run_with_palette(&self, buf: PixelBuffer, palette: Palette) -> PipelineOutput {
        let buf = self.apply_stages(buf);
        self.quantize(buf, palette)
    }

    /// Convenience wrapper that validates raw bytes first.
    pub fn run_bytes(
        &self,
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<PipelineOutput, Error> {
        let buf = PixelBuffer::new(width, height, channels, data)?;
        Ok(self.run(buf))
    }

    /// Tone filters, morphology, and downsampling in pipeline order.
    fn apply_stages(&self, mut buf: PixelBuffer) -> PixelBuffer {
        let c = &self.config;
        if c.grayscale {
            buf = filter::grayscale(buf);
        }
        if c.invert_color {
            buf = filter::invert(buf);
        }
        if c.is_hue || c.is_luminance || c.is_saturation {
            buf = filter::override_hls(
                buf,
                c.is_hue.then_some(c.hue),
                c.is_luminance.then_some(c.luminance),
                c.is_saturation.then_some(c.saturation),
            );
        }
        if c.contrast || c.brightness {
            let contrast = if c.contrast { c.contrast_level } else { 1.0 };
            let brightness = if c.brightness { c.brightness_level } else { 0 };
            buf = filter::adjust_tone(buf, contrast, brightness);
        }
        if c.edge_enhancement && c.white_size != 0 {
            buf = filter::edge_thicken(buf, c.white_size);
        }
        if c.pixel_length > 0 {
            buf = downsample(buf, c.pixel_length, c.pooling);
        }
        buf
    }

    fn extract_palette(&self, buf: &PixelBuffer) -> Palette {
        let extractor = PaletteExtractor::new().seed(self.config.seed);
        if buf.long_edge() > SAMPLE_LONG_EDGE {
            debug!(
                long_edge = buf.long_edge(),
                cap = SAMPLE_LONG_EDGE,
                "shrinking k-means sample buffer"
            );
            let sample = downsample(buf.clone(), SAMPLE_LONG_EDGE, PoolingMode::Average);
            extractor.extract(&sample, self.config.color_levels)
        } else {
            extractor.extract(buf, self.config.color_levels)
        }
    }

    fn quantize(&self, buf: PixelBuffer, palette: Palette) -> PipelineOutput {
        let options = DitherOptions::new().strength(self.config.dither_strength);
        let buffer = dither(buf, &palette, self.config.dither_kind, &options);
        PipelineOutput { buffer, palette }
    }
}
