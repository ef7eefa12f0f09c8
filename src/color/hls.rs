//! RGB <-> HLS conversion in the 8-bit OpenCV convention.
//!
//! Hue is stored halved so it fits a byte: 0..=179 covers the full
//! 0..360 degree circle. Lightness and saturation use the full 0..=255
//! range. The channel-override filters convert each pixel to HLS,
//! overwrite one or more cylindrical channels with a constant, and
//! convert back.

/// Convert an 8-bit RGB triple to 8-bit HLS.
///
/// Returns `(h, l, s)` with `h` in 0..=179 (degrees halved) and `l`,
/// `s` in 0..=255. Achromatic pixels report hue 0 and saturation 0.
pub fn rgb_to_hls(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d < f32::EPSILON {
        return (0, (l * 255.0).round() as u8, 0);
    }

    let s = if l <= 0.5 {
        d / (max + min)
    } else {
        d / (2.0 - max - min)
    };

    // Hue in degrees, 0..360
    let mut h = if max == rf {
        60.0 * ((gf - bf) / d)
    } else if max == gf {
        60.0 * ((bf - rf) / d) + 120.0
    } else {
        60.0 * ((rf - gf) / d) + 240.0
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h8 = ((h / 2.0).round() as u16 % 180) as u8;
    (h8, (l * 255.0).round() as u8, (s * 255.0).round() as u8)
}

/// Convert an 8-bit HLS triple back to 8-bit RGB.
///
/// `h` is interpreted modulo 180 (degrees halved); `l` and `s` cover
/// 0..=255.
pub fn hls_to_rgb(h: u8, l: u8, s: u8) -> (u8, u8, u8) {
    let hf = (h as f32 % 180.0) * 2.0 / 360.0;
    let lf = l as f32 / 255.0;
    let sf = s as f32 / 255.0;

    if sf < f32::EPSILON {
        let v = (lf * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if lf < 0.5 {
        lf * (1.0 + sf)
    } else {
        lf + sf - lf * sf
    };
    let p = 2.0 * lf - q;

    let r = hue_component(p, q, hf + 1.0 / 3.0);
    let g = hue_component(p, q, hf);
    let b = hue_component(p, q, hf - 1.0 / 3.0);

    (
        (r * 255.0).round().clamp(0.0, 255.0) as u8,
        (g * 255.0).round().clamp(0.0, 255.0) as u8,
        (b * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

fn hue_component(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn primaries_map_to_expected_hues() {
        assert_eq!(rgb_to_hls(255, 0, 0), (0, 128, 255));
        assert_eq!(rgb_to_hls(0, 255, 0), (60, 128, 255));
        assert_eq!(rgb_to_hls(0, 0, 255), (120, 128, 255));
    }

    #[test]
    fn grays_are_achromatic() {
        assert_eq!(rgb_to_hls(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hls(255, 255, 255), (0, 255, 0));
        assert_eq!(rgb_to_hls(100, 100, 100), (0, 100, 0));
    }

    #[test]
    fn gray_round_trip_is_exact() {
        for v in [0u8, 1, 50, 127, 128, 200, 255] {
            let (h, l, s) = rgb_to_hls(v, v, v);
            assert_eq!(hls_to_rgb(h, l, s), (v, v, v), "gray {v}");
        }
    }

    #[test]
    fn round_trip_error_stays_small() {
        // 8-bit HLS loses precision; allow 3 LSB per channel.
        for (r, g, b) in [
            (255u8, 0u8, 0u8),
            (12, 200, 90),
            (130, 64, 220),
            (250, 250, 10),
            (3, 3, 5),
        ] {
            let (h, l, s) = rgb_to_hls(r, g, b);
            let (r2, g2, b2) = hls_to_rgb(h, l, s);
            for (a, c) in [(r, r2), (g, g2), (b, b2)] {
                let err = (a as i16 - c as i16).abs();
                assert!(err <= 3, "({r},{g},{b}) -> ({r2},{g2},{b2}), err {err}");
            }
        }
    }

    #[test]
    fn hue_wraps_modulo_180() {
        // Hue 180 is the same angle as hue 0.
        assert_eq!(hls_to_rgb(180, 128, 255), hls_to_rgb(0, 128, 255));
    }

    #[test]
    fn negative_hue_side_wraps_into_range() {
        // Magenta sits between red and blue; its raw hue is negative
        // before the +360 wrap.
        let (h, _, _) = rgb_to_hls(255, 0, 255);
        assert_eq!(h, 150);
    }
}
