//! Dithering configuration.

/// Configuration for the dithering stage.
///
/// Built fluently:
///
/// ```
/// use pixelette::DitherOptions;
///
/// let options = DitherOptions::new().strength(0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherOptions {
    /// Dither intensity in 0.0..=1.0 (clamped at use).
    ///
    /// Scales the ordered-dither perturbation amplitude, or the
    /// fraction of quantization error that diffusion kernels propagate.
    /// At 0.0 every pixel simply snaps to its nearest palette color.
    pub strength: f32,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DitherOptions {
    /// Default options: full strength.
    pub fn new() -> Self {
        Self { strength: 1.0 }
    }

    /// Set the dither strength (0.0..=1.0).
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_full_strength() {
        assert_eq!(DitherOptions::new().strength, 1.0);
        assert_eq!(DitherOptions::default(), DitherOptions::new());
    }

    #[test]
    fn builder_sets_strength() {
        assert_eq!(DitherOptions::new().strength(0.25).strength, 0.25);
    }
}
