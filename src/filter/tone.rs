//! Point filters: grayscale, inversion, HLS channel overrides, and
//! contrast/brightness adjustment.

use crate::buffer::PixelBuffer;
use crate::color::{hls_to_rgb, luma, rgb_to_hls};

/// Replace every pixel with its Rec. 601 luma.
///
/// All three channels are set to the same rounded luma value.
pub fn grayscale(mut buf: PixelBuffer) -> PixelBuffer {
    let step = buf.channels() as usize;
    for px in buf.data_mut().chunks_exact_mut(step) {
        let y = luma(px[0], px[1], px[2]);
        px[0] = y;
        px[1] = y;
        px[2] = y;
    }
    buf
}

/// Invert the RGB channels (`255 - v`). Alpha is untouched.
pub fn invert(mut buf: PixelBuffer) -> PixelBuffer {
    let step = buf.channels() as usize;
    for px in buf.data_mut().chunks_exact_mut(step) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
    buf
}

/// Overwrite cylindrical channels with constants.
///
/// Each pixel is converted to HLS, every `Some` channel is replaced
/// with the given constant, and the pixel is converted back. The three
/// overrides compose in a single pass, so forcing hue and saturation
/// together costs one round trip, not two.
///
/// Hue values are interpreted modulo 180 (degrees halved); lightness
/// and saturation cover 0..=255. With all three `None` this is a
/// (lossy) identity and the caller should skip it instead.
pub fn override_hls(
    mut buf: PixelBuffer,
    hue: Option<u8>,
    luminance: Option<u8>,
    saturation: Option<u8>,
) -> PixelBuffer {
    if hue.is_none() && luminance.is_none() && saturation.is_none() {
        return buf;
    }
    let step = buf.channels() as usize;
    for px in buf.data_mut().chunks_exact_mut(step) {
        let (h, l, s) = rgb_to_hls(px[0], px[1], px[2]);
        let (r, g, b) = hls_to_rgb(
            hue.unwrap_or(h),
            luminance.unwrap_or(l),
            saturation.unwrap_or(s),
        );
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
    buf
}

/// Apply contrast scaling and a brightness offset in one pass.
///
/// Each channel maps through `clamp(v * contrast + brightness, 0, 255)`.
/// A contrast of `1.0` with brightness `0` is the identity; there is no
/// mid-gray pivot, so raising contrast also brightens mid-tones.
pub fn adjust_tone(mut buf: PixelBuffer, contrast: f32, brightness: i16) -> PixelBuffer {
    // Precomputed per-value table; pixels just index into it.
    let mut table = [0u8; 256];
    for (v, out) in table.iter_mut().enumerate() {
        let adjusted = v as f32 * contrast + brightness as f32;
        *out = adjusted.round().clamp(0.0, 255.0) as u8;
    }

    let step = buf.channels() as usize;
    for px in buf.data_mut().chunks_exact_mut(step) {
        px[0] = table[px[0] as usize];
        px[1] = table[px[1] as usize];
        px[2] = table[px[2] as usize];
    }
    buf
}
