//! The palette type and nearest-color lookup.

use serde::{Deserialize, Serialize};

use super::PaletteError;
use crate::color::Rgb;

/// An ordered, non-empty list of output colors.
///
/// Duplicate entries are allowed: an extracted palette padded up to a
/// power-of-two size legitimately repeats colors, and duplicates are
/// harmless for lookup (ties resolve to the lowest index, so the first
/// occurrence always wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Creates a palette from a list of colors.
    ///
    /// Fails only if the list is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Internal constructor for the extractor, which guarantees
    /// non-emptiness itself.
    pub(crate) fn from_colors(colors: Vec<Rgb>) -> Self {
        debug_assert!(!colors.is_empty());
        Self { colors }
    }

    /// Creates a palette from hex color strings.
    ///
    /// # Example
    /// ```
    /// use pixelette::Palette;
    ///
    /// let bw = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
    /// assert_eq!(bw.len(), 2);
    /// ```
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| s.as_ref().parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Replaces the color at `index`, for interactive palette editing.
    pub fn set(&mut self, index: usize, color: Rgb) -> Result<(), PaletteError> {
        let len = self.colors.len();
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                Ok(())
            }
            None => Err(PaletteError::IndexOutOfBounds { index, len }),
        }
    }

    /// The palette as lowercase `#rrggbb` strings.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    /// Index of the entry nearest to `color` in squared Euclidean
    /// distance. Ties resolve to the lowest index.
    pub fn find_nearest(&self, color: Rgb) -> usize {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(entry);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    /// Nearest entry to an unclamped floating-point pixel.
    ///
    /// Error diffusion accumulates values outside 0..=255; distances
    /// are computed on the raw floats so out-of-range pixels still rank
    /// candidates correctly. Ties resolve to the lowest index.
    pub(crate) fn find_nearest_f32(&self, rgb: [f32; 3]) -> usize {
        let mut best = 0;
        let mut best_dist = f32::MAX;
        for (i, &entry) in self.colors.iter().enumerate() {
            let dr = rgb[0] - entry.r as f32;
            let dg = rgb[1] - entry.g as f32;
            let db = rgb[2] - entry.b as f32;
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<Rgb>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bw() -> Palette {
        Palette::from_hex(&["#000", "#fff"]).unwrap()
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(Palette::new(vec![]).unwrap_err(), PaletteError::Empty);
    }

    #[test]
    fn duplicates_are_allowed() {
        let p = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(0, 0, 0)]).unwrap();
        assert_eq!(p.len(), 2);
        // The first occurrence wins lookups.
        assert_eq!(p.find_nearest(Rgb::new(5, 5, 5)), 0);
    }

    #[test]
    fn from_hex_propagates_parse_errors() {
        let err = Palette::from_hex(&["#000", "oops"]).unwrap_err();
        assert!(matches!(err, PaletteError::ParseColor(_)));
    }

    #[test]
    fn find_nearest_picks_closest() {
        let p = bw();
        assert_eq!(p.find_nearest(Rgb::new(10, 10, 10)), 0);
        assert_eq!(p.find_nearest(Rgb::new(200, 200, 200)), 1);
    }

    #[test]
    fn find_nearest_tie_resolves_to_lowest_index() {
        let p = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(100, 0, 0)]).unwrap();
        // 50 is equidistant from 0 and 100.
        assert_eq!(p.find_nearest(Rgb::new(50, 0, 0)), 0);
    }

    #[test]
    fn find_nearest_f32_handles_out_of_range() {
        let p = bw();
        assert_eq!(p.find_nearest_f32([300.0, 300.0, 300.0]), 1);
        assert_eq!(p.find_nearest_f32([-80.0, -80.0, -80.0]), 0);
    }

    #[test]
    fn set_replaces_slot() {
        let mut p = bw();
        p.set(1, Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(p.get(1), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn set_out_of_bounds_errors() {
        let mut p = bw();
        let err = p.set(2, Rgb::new(0, 0, 0)).unwrap_err();
        assert_eq!(err, PaletteError::IndexOutOfBounds { index: 2, len: 2 });
    }

    #[test]
    fn to_hex_is_lowercase() {
        let p = Palette::new(vec![Rgb::new(0xAB, 0xCD, 0xEF)]).unwrap();
        assert_eq!(p.to_hex(), vec!["#abcdef"]);
    }

    #[test]
    fn serde_round_trip() {
        let p = bw();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"[{"r":0,"g":0,"b":0},{"r":255,"g":255,"b":255}]"#);
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn serde_rejects_empty_list() {
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }
}
