//! Grayscale morphology for line-weight control.
//!
//! Erosion shrinks bright regions, which visually thickens dark line
//! art; dilation does the opposite. Both use an elliptical (circular)
//! structuring element and clamp-to-edge sampling at the borders.

use crate::buffer::PixelBuffer;

/// Thicken or thin dark lines by eroding or dilating bright regions.
///
/// `white_size` is a signed kernel diameter in pixels: positive erodes
/// (each channel takes the neighborhood minimum, dark lines grow),
/// negative dilates (neighborhood maximum, dark lines shrink). Zero, or
/// a magnitude small enough that the circular kernel degenerates to a
/// single pixel, is the identity.
///
/// RGB channels are processed independently; alpha is copied through.
pub fn edge_thicken(buf: PixelBuffer, white_size: i32) -> PixelBuffer {
    let radius = (white_size.unsigned_abs() / 2) as i32;
    if radius == 0 {
        return buf;
    }
    let take_min = white_size > 0;

    // Offsets inside the circle of the given radius. Precomputed once
    // instead of testing dx*dx + dy*dy per sample.
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                offsets.push((dx, dy));
            }
        }
    }

    let width = buf.width();
    let height = buf.height();
    let mut result = buf.clone();

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let mut extreme = [if take_min { 255u8 } else { 0u8 }; 3];
            for &(dx, dy) in &offsets {
                let sx = (x + dx).clamp(0, width as i32 - 1) as u32;
                let sy = (y + dy).clamp(0, height as i32 - 1) as u32;
                let px = buf.rgb_at(sx, sy);
                for c in 0..3 {
                    extreme[c] = if take_min {
                        extreme[c].min(px[c])
                    } else {
                        extreme[c].max(px[c])
                    };
                }
            }
            let o = buf.pixel_index(x as u32, y as u32);
            result.data_mut()[o..o + 3].copy_from_slice(&extreme);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// 3x3 white image with a single black center pixel.
    fn dot() -> PixelBuffer {
        let mut data = vec![255u8; 3 * 3 * 3];
        let center = (1 * 3 + 1) * 3;
        data[center] = 0;
        data[center + 1] = 0;
        data[center + 2] = 0;
        PixelBuffer::new(3, 3, 3, data).unwrap()
    }

    #[test]
    fn zero_size_is_identity() {
        let buf = dot();
        let orig = buf.clone();
        assert_eq!(edge_thicken(buf, 0), orig);
    }

    #[test]
    fn diameter_one_is_identity() {
        let buf = dot();
        let orig = buf.clone();
        assert_eq!(edge_thicken(buf, 1), orig);
    }

    #[test]
    fn positive_size_grows_dark_regions() {
        // Diameter 2 -> radius 1: the black dot spreads to its plus-shaped
        // neighborhood under erosion.
        let out = edge_thicken(dot(), 2);
        assert_eq!(out.rgb_at(1, 1), [0, 0, 0]);
        assert_eq!(out.rgb_at(0, 1), [0, 0, 0]);
        assert_eq!(out.rgb_at(1, 0), [0, 0, 0]);
        assert_eq!(out.rgb_at(2, 1), [0, 0, 0]);
        assert_eq!(out.rgb_at(1, 2), [0, 0, 0]);
        // Corners are outside the circular kernel.
        assert_eq!(out.rgb_at(0, 0), [255, 255, 255]);
        assert_eq!(out.rgb_at(2, 2), [255, 255, 255]);
    }

    #[test]
    fn negative_size_erases_dark_dot() {
        // Dilation replaces the lone dark pixel with its bright neighbors.
        let out = edge_thicken(dot(), -2);
        assert_eq!(out.rgb_at(1, 1), [255, 255, 255]);
    }

    #[test]
    fn borders_clamp_instead_of_wrapping() {
        // Black left column, white right column. Dilating must not pull
        // the right edge's white across a wrapped border.
        let data = vec![
            0, 0, 0, 255, 255, 255, //
            0, 0, 0, 255, 255, 255,
        ];
        let buf = PixelBuffer::new(2, 2, 3, data).unwrap();
        let out = edge_thicken(buf, 2);
        // Erosion with radius 1 reaches the black column from x=1.
        assert_eq!(out.rgb_at(1, 0), [0, 0, 0]);
        assert_eq!(out.rgb_at(0, 0), [0, 0, 0]);
    }

    #[test]
    fn alpha_passes_through() {
        let mut data = vec![255u8; 2 * 1 * 4];
        data[3] = 30;
        data[7] = 200;
        let buf = PixelBuffer::new(2, 1, 4, data).unwrap();
        let out = edge_thicken(buf, 4);
        assert_eq!(out.alpha_at(0, 0), 30);
        assert_eq!(out.alpha_at(1, 0), 200);
    }
}
