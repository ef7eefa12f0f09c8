//! Error diffusion kernel definitions.
//!
//! A kernel specifies how the quantization error of a pixel is split
//! among neighbors that have not been processed yet.

/// An error diffusion kernel.
///
/// Each entry is an `(dx, dy, weight)` offset into the unprocessed
/// neighborhood; a neighbor receives `error * weight / divisor`. The
/// `max_dy` field states how many rows ahead the kernel reaches, which
/// sizes the error buffer (`max_dy + 1` rows).
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// `(dx, dy, weight)` entries. `dy` is always non-negative: error
    /// only flows forward in raster order.
    pub entries: &'static [(i32, i32, u8)],

    /// Divisor normalizing the weights.
    pub divisor: u8,

    /// Maximum `dy` across entries.
    pub max_dy: usize,
}

/// Floyd-Steinberg kernel.
///
/// Four neighbors, 100% propagation (16/16). The classic error
/// diffusion algorithm.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};

/// Atkinson kernel.
///
/// Six neighbors, 75% propagation (6/8). The deliberately lost quarter
/// of the error keeps small palettes from bleeding color across flat
/// regions, which suits low-color pixel art.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    max_dy: 2,
};
