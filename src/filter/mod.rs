//! Per-pixel tone filters and neighborhood morphology.
//!
//! Every filter consumes its input buffer and returns the result, so a
//! chain of filters reads as a pipeline and never clones pixel data.
//! Alpha channels pass through untouched.

mod morphology;
mod tone;

pub use morphology::edge_thicken;
pub use tone::{adjust_tone, grayscale, invert, override_hls};
