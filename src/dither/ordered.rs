//! Bayer matrices for ordered dithering.
//!
//! Ordered dithering perturbs each pixel by a position-dependent
//! threshold before the nearest-palette lookup. Unlike error diffusion
//! it is purely local, so it produces the regular crosshatch texture
//! associated with retro hardware.

/// Classic 4x4 Bayer index matrix.
pub const BAYER_4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Classic 8x8 Bayer index matrix.
pub const BAYER_8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Normalized threshold at `(x, y)` for an `n * n` Bayer matrix.
///
/// Indices map to `(index + 0.5) / n^2`, centering the distribution on
/// 0.5 so the perturbation `(threshold - 0.5) * 256 * strength` adds no
/// net bias over a full tile.
#[inline]
pub(crate) fn bayer_threshold(matrix_index: u8, cells: u16) -> f32 {
    (matrix_index as f32 + 0.5) / cells as f32
}
