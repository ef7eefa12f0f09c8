//! 8-bit sRGB color type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseColorError;

/// An 8-bit sRGB color.
///
/// This is the storage type for palette entries and the unit of distance
/// comparison during quantization. Distance is plain squared Euclidean
/// distance in sRGB space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance to another color.
    ///
    /// Maximum possible value is `3 * 255^2 = 195075`, well within `u32`.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Format as a lowercase `#rrggbb` hex string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB`, and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixelette::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::new(255, 255, 255));
    ///
    /// let red: Rgb = "#f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distance_squared_is_symmetric() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(30, 20, 10);
        assert_eq!(a.distance_squared(b), b.distance_squared(a));
        assert_eq!(a.distance_squared(b), 800);
    }

    #[test]
    fn distance_squared_to_self_is_zero() {
        let c = Rgb::new(123, 45, 67);
        assert_eq!(c.distance_squared(c), 0);
    }

    #[test]
    fn max_distance_fits_in_u32() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.distance_squared(white), 195_075);
    }

    #[test]
    fn parses_six_digit_hex() {
        let c: Rgb = "#DEADBE".parse().unwrap();
        assert_eq!(c, Rgb::new(0xDE, 0xAD, 0xBE));

        let no_hash: Rgb = "deadbe".parse().unwrap();
        assert_eq!(no_hash, c);
    }

    #[test]
    fn parses_shorthand_hex() {
        let c: Rgb = "#abc".parse().unwrap();
        assert_eq!(c, Rgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(
            "#GGG".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!(
            "".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
    }

    #[test]
    fn hex_round_trip() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(c.to_hex(), "#010203");
        assert_eq!(c.to_hex().parse::<Rgb>().unwrap(), c);
    }
}
