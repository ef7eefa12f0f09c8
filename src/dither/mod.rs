//! Quantization and dithering.
//!
//! Every pixel of the input snaps to a palette entry. The dither kind
//! decides how the rounding error is handled:
//!
//! - **None**: plain nearest-color mapping, hard banding and all.
//! - **Bayer4 / Bayer8**: ordered dithering. A tiled threshold matrix
//!   perturbs each pixel before the lookup. Purely local, produces the
//!   regular crosshatch of retro hardware.
//! - **FloydSteinberg / Atkinson**: error diffusion. The quantization
//!   error of each pixel is pushed onto unprocessed neighbors, trading
//!   texture regularity for smoother gradients.
//!
//! Processing is strict raster order (left to right, top to bottom),
//! so results are deterministic and reproducible across runs.

mod kernel;
mod options;
mod ordered;

pub use kernel::{Kernel, ATKINSON, FLOYD_STEINBERG};
pub use options::DitherOptions;
pub use ordered::{BAYER_4, BAYER_8};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::palette::Palette;
use ordered::bayer_threshold;

/// Which dithering algorithm the quantization stage uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherKind {
    /// Nearest palette color, no dithering.
    #[default]
    None,
    /// Ordered dithering with the 4x4 Bayer matrix.
    Bayer4,
    /// Ordered dithering with the 8x8 Bayer matrix.
    Bayer8,
    /// Floyd-Steinberg error diffusion (100% propagation).
    FloydSteinberg,
    /// Atkinson error diffusion (75% propagation).
    Atkinson,
}

/// Sliding window of error rows for diffusion dithering.
///
/// Only the rows the kernel can reach are stored (`max_dy + 1`), not a
/// full-image error plane. `advance_row` rotates the window: the
/// finished row is recycled as the new furthest row, zeroed.
#[derive(Debug)]
struct ErrorBuffer {
    /// rows[0] is the current row, rows[1] the next, and so on.
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Error accumulated for a pixel in the current row.
    #[inline]
    fn accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Adds error to a future pixel. Out-of-bounds targets are ignored.
    #[inline]
    fn add(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Quantize a buffer to the given palette.
///
/// Every opaque pixel is replaced by a palette color (and alpha 255 in
/// RGBA buffers). Translucent pixels bypass quantization entirely:
/// their RGB bytes pass through and their alpha becomes 0, so they
/// neither receive nor emit diffusion error.
pub fn dither(
    buf: PixelBuffer,
    palette: &Palette,
    kind: DitherKind,
    options: &DitherOptions,
) -> PixelBuffer {
    let strength = options.strength.clamp(0.0, 1.0);
    debug!(?kind, strength, palette_len = palette.len(), "dithering");
    match kind {
        DitherKind::None => map_nearest(buf, palette),
        DitherKind::Bayer4 | DitherKind::Bayer8 => map_ordered(buf, palette, kind, strength),
        DitherKind::FloydSteinberg => diffuse(buf, palette, &FLOYD_STEINBERG, strength),
        DitherKind::Atkinson => diffuse(buf, palette, &ATKINSON, strength),
    }
}

/// Writes a palette color (and 255 alpha) at the given pixel.
#[inline]
fn write_pixel(buf: &mut PixelBuffer, x: u32, y: u32, color: Rgb) {
    let channels = buf.channels();
    let i = buf.pixel_index(x, y);
    let data = buf.data_mut();
    data[i] = color.r;
    data[i + 1] = color.g;
    data[i + 2] = color.b;
    if channels == 4 {
        data[i + 3] = 255;
    }
}

/// Zeroes the alpha at the given pixel, leaving RGB alone.
#[inline]
fn write_transparent(buf: &mut PixelBuffer, x: u32, y: u32) {
    if buf.channels() == 4 {
        let i = buf.pixel_index(x, y);
        buf.data_mut()[i + 3] = 0;
    }
}

fn map_nearest(mut buf: PixelBuffer, palette: &Palette) -> PixelBuffer {
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            if buf.is_translucent(x, y) {
                write_transparent(&mut buf, x, y);
                continue;
            }
            let idx = palette.find_nearest(Rgb::from_bytes(buf.rgb_at(x, y)));
            write_pixel(&mut buf, x, y, palette.colors()[idx]);
        }
    }
    buf
}

fn map_ordered(
    mut buf: PixelBuffer,
    palette: &Palette,
    kind: DitherKind,
    strength: f32,
) -> PixelBuffer {
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            if buf.is_translucent(x, y) {
                write_transparent(&mut buf, x, y);
                continue;
            }
            let threshold = match kind {
                DitherKind::Bayer4 => {
                    bayer_threshold(BAYER_4[y as usize % 4][x as usize % 4], 16)
                }
                _ => bayer_threshold(BAYER_8[y as usize % 8][x as usize % 8], 64),
            };
            let perturb = (threshold - 0.5) * 256.0 * strength;
            let px = buf.rgb_at(x, y);
            let perturbed = [
                (px[0] as f32 + perturb).clamp(0.0, 255.0),
                (px[1] as f32 + perturb).clamp(0.0, 255.0),
                (px[2] as f32 + perturb).clamp(0.0, 255.0),
            ];
            let idx = palette.find_nearest_f32(perturbed);
            write_pixel(&mut buf, x, y, palette.colors()[idx]);
        }
    }
    buf
}

fn diffuse(
    mut buf: PixelBuffer,
    palette: &Palette,
    kernel: &Kernel,
    strength: f32,
) -> PixelBuffer {
    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let divisor = kernel.divisor as f32;
    let mut errors = ErrorBuffer::new(width, kernel.max_dy + 1);

    for y in 0..height {
        for x in 0..width {
            if buf.is_translucent(x as u32, y as u32) {
                // Transparent pixels neither absorb nor emit error;
                // whatever accumulated here is dropped.
                write_transparent(&mut buf, x as u32, y as u32);
                continue;
            }

            let accumulated = errors.accumulated(x);
            let src = buf.rgb_at(x as u32, y as u32);
            let pixel = [
                (src[0] as f32 + accumulated[0]).clamp(0.0, 255.0),
                (src[1] as f32 + accumulated[1]).clamp(0.0, 255.0),
                (src[2] as f32 + accumulated[2]).clamp(0.0, 255.0),
            ];

            let idx = palette.find_nearest_f32(pixel);
            let chosen = palette.colors()[idx];
            write_pixel(&mut buf, x as u32, y as u32, chosen);

            let error = [
                pixel[0] - chosen.r as f32,
                pixel[1] - chosen.g as f32,
                pixel[2] - chosen.b as f32,
            ];

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                let ny = y + dy as usize;
                if nx >= 0 && (nx as usize) < width && ny < height {
                    let scale = weight as f32 / divisor * strength;
                    errors.add(
                        nx as usize,
                        dy as usize,
                        [error[0] * scale, error[1] * scale, error[2] * scale],
                    );
                }
            }
        }
        errors.advance_row();
    }
    buf
}
