//! Aspect-preserving block-pool downsampling.
//!
//! The image is divided into a fixed grid of rectangular blocks and
//! each block collapses to one output pixel. Block edges fall on whole
//! source pixels, which is what gives downsampled pixel art its crisp,
//! blocky look (a bilinear resampler would smear it).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;

/// How a source block collapses to a single output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolingMode {
    /// Take the block's top-left pixel. Fastest, keeps exact source colors.
    Nearest,
    /// Per-channel mean, rounded to the nearest integer.
    #[default]
    Average,
    /// Per-channel maximum. Brightens, useful for thin light features.
    Max,
}

/// Downsample so the long edge is `pixel_length`, preserving aspect ratio.
///
/// The short edge scales proportionally, rounded to the nearest integer
/// and clamped to at least 1 so extreme aspect ratios never collapse to
/// a zero-height strip. A `pixel_length` at or above the source long
/// edge returns the input unchanged (this stage never upscales).
///
/// Blocks are `src/out` pixels wide (integer division); the last block
/// in each row and column absorbs the remainder so every source pixel
/// belongs to exactly one block.
pub fn downsample(buf: PixelBuffer, pixel_length: u32, mode: PoolingMode) -> PixelBuffer {
    let src_w = buf.width();
    let src_h = buf.height();
    if pixel_length == 0 || pixel_length >= buf.long_edge() {
        return buf;
    }

    let (out_w, out_h) = if src_w >= src_h {
        let h = ((src_h as f64 * pixel_length as f64 / src_w as f64).round() as u32).max(1);
        (pixel_length, h)
    } else {
        let w = ((src_w as f64 * pixel_length as f64 / src_h as f64).round() as u32).max(1);
        (w, pixel_length)
    };
    debug!(src_w, src_h, out_w, out_h, ?mode, "downsampling");

    let block_w = src_w / out_w;
    let block_h = src_h / out_h;
    let channels = buf.channels() as usize;
    let src = buf.data();
    let mut out = Vec::with_capacity(out_w as usize * out_h as usize * channels);

    for cy in 0..out_h {
        let y0 = cy * block_h;
        let y1 = if cy == out_h - 1 { src_h } else { y0 + block_h };
        for cx in 0..out_w {
            let x0 = cx * block_w;
            let x1 = if cx == out_w - 1 { src_w } else { x0 + block_w };

            match mode {
                PoolingMode::Nearest => {
                    let i = buf.pixel_index(x0, y0);
                    out.extend_from_slice(&src[i..i + channels]);
                }
                PoolingMode::Average => {
                    let mut sums = [0u64; 4];
                    let count = ((x1 - x0) as u64) * ((y1 - y0) as u64);
                    for y in y0..y1 {
                        for x in x0..x1 {
                            let i = buf.pixel_index(x, y);
                            for c in 0..channels {
                                sums[c] += src[i + c] as u64;
                            }
                        }
                    }
                    for &sum in sums.iter().take(channels) {
                        out.push(((sum + count / 2) / count) as u8);
                    }
                }
                PoolingMode::Max => {
                    let mut maxes = [0u8; 4];
                    for y in y0..y1 {
                        for x in x0..x1 {
                            let i = buf.pixel_index(x, y);
                            for c in 0..channels {
                                maxes[c] = maxes[c].max(src[i + c]);
                            }
                        }
                    }
                    out.extend_from_slice(&maxes[..channels]);
                }
            }
        }
    }

    PixelBuffer::from_parts(out_w, out_h, channels as u8, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y * width) % 256) as u8;
                data.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::new(width, height, 3, data).unwrap()
    }

    #[test]
    fn long_edge_matches_target() {
        let out = downsample(gradient(100, 40), 10, PoolingMode::Nearest);
        assert_eq!(out.width(), 10);
        assert_eq!(out.height(), 4);
    }

    #[test]
    fn portrait_orientation_scales_width() {
        let out = downsample(gradient(40, 100), 10, PoolingMode::Nearest);
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 10);
    }

    #[test]
    fn short_edge_never_collapses_to_zero() {
        let out = downsample(gradient(1000, 3), 20, PoolingMode::Nearest);
        assert_eq!(out.width(), 20);
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn target_at_or_above_source_is_identity() {
        let buf = gradient(10, 5);
        let orig = buf.clone();
        assert_eq!(downsample(buf.clone(), 10, PoolingMode::Average), orig);
        assert_eq!(downsample(buf, 50, PoolingMode::Average), orig);
    }

    #[test]
    fn nearest_takes_block_top_left() {
        // 4x2 -> 2x1: blocks are 2x2, top-left pixels are (0,0) and (2,0).
        let data = vec![
            10, 10, 10, 20, 20, 20, 30, 30, 30, 40, 40, 40, //
            50, 50, 50, 60, 60, 60, 70, 70, 70, 80, 80, 80,
        ];
        let buf = PixelBuffer::new(4, 2, 3, data).unwrap();
        let out = downsample(buf, 2, PoolingMode::Nearest);
        assert_eq!(out.rgb_at(0, 0), [10, 10, 10]);
        assert_eq!(out.rgb_at(1, 0), [30, 30, 30]);
    }

    #[test]
    fn average_rounds_to_nearest() {
        // Block of 10, 20, 30, 41: mean 25.25 -> 25.
        let data = vec![
            10, 10, 10, 20, 20, 20, //
            30, 30, 30, 41, 41, 41,
        ];
        let buf = PixelBuffer::new(2, 2, 3, data).unwrap();
        let out = downsample(buf, 1, PoolingMode::Average);
        assert_eq!(out.rgb_at(0, 0), [25, 25, 25]);
    }

    #[test]
    fn max_takes_channel_maxima_independently() {
        let data = vec![
            200, 0, 0, 255, 0, 90, 7, 255, //
            1, 2, 10, 255, 3, 4, 5, 255,
        ];
        let buf = PixelBuffer::new(2, 2, 4, data).unwrap();
        let out = downsample(buf, 1, PoolingMode::Max);
        assert_eq!(out.data(), &[200, 90, 10, 255]);
    }

    #[test]
    fn last_block_absorbs_remainder() {
        // 5 wide -> 2 wide: block_w = 2, last block covers x = 2..5.
        let data: Vec<u8> = (0..5).flat_map(|x| [x * 10, 0, 0]).collect();
        let buf = PixelBuffer::new(5, 1, 3, data).unwrap();
        let out = downsample(buf, 2, PoolingMode::Average);
        // First block: mean(0, 10) = 5. Last block: mean(20, 30, 40) = 30.
        assert_eq!(out.rgb_at(0, 0)[0], 5);
        assert_eq!(out.rgb_at(1, 0)[0], 30);
    }

    #[test]
    fn square_input_uses_width_branch() {
        let out = downsample(gradient(8, 8), 2, PoolingMode::Average);
        assert_eq!((out.width(), out.height()), (2, 2));
    }
}
