//! Seeded k-means palette extraction.
//!
//! Clustering runs in sRGB space with k-means++ seeding and a bounded
//! Lloyd iteration count. The random generator is seeded from the
//! extractor config, so the same image and settings always yield the
//! same palette. Pixels below the translucency threshold never vote.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::Palette;
use crate::buffer::PixelBuffer;
use crate::color::Rgb;

/// Extracts a power-of-two palette from an image via k-means.
///
/// Built fluently:
///
/// ```
/// use pixelette::{PaletteExtractor, PixelBuffer};
///
/// let buf = PixelBuffer::filled(4, 4, &[200, 30, 30]).unwrap();
/// let palette = PaletteExtractor::new().seed(7).extract(&buf, 2);
/// assert_eq!(palette.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteExtractor {
    max_iterations: u32,
    epsilon: f64,
    seed: u64,
}

impl Default for PaletteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteExtractor {
    /// Default settings: 10 Lloyd iterations, convergence epsilon 1.0,
    /// seed 0.
    pub fn new() -> Self {
        Self {
            max_iterations: 10,
            epsilon: 1.0,
            seed: 0,
        }
    }

    /// Seed for centroid initialization. Same seed, same palette.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Upper bound on Lloyd iterations.
    pub fn max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }

    /// Total centroid movement below which iteration stops early.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Extracts a palette of `2^color_levels` colors.
    ///
    /// `color_levels` is clamped to 1..=8, so palettes range from 2 to
    /// 256 colors. Translucent pixels are excluded from sampling; a
    /// fully transparent image yields an all-black palette. When the
    /// image has fewer distinct opaque colors than requested, the
    /// distinct colors are kept (ordered by frequency) and the palette
    /// is padded by cycling through the most frequent ones.
    pub fn extract(&self, buf: &PixelBuffer, color_levels: u8) -> Palette {
        let k = 1usize << color_levels.clamp(1, 8);

        let mut samples: Vec<[f64; 3]> = Vec::new();
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                if buf.is_translucent(x, y) {
                    continue;
                }
                let [r, g, b] = buf.rgb_at(x, y);
                samples.push([r as f64, g as f64, b as f64]);
            }
        }

        if samples.is_empty() {
            debug!(k, "no opaque pixels, returning all-black palette");
            return Palette::from_colors(vec![Rgb::new(0, 0, 0); k]);
        }

        // First-seen order makes the frequency sort deterministic.
        let mut counts: Vec<(Rgb, u32)> = Vec::new();
        let mut index: HashMap<Rgb, usize> = HashMap::new();
        for s in &samples {
            let color = Rgb::new(s[0] as u8, s[1] as u8, s[2] as u8);
            match index.get(&color) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(color, counts.len());
                    counts.push((color, 1));
                }
            }
        }

        if counts.len() <= k {
            counts.sort_by(|a, b| b.1.cmp(&a.1));
            let mut colors: Vec<Rgb> = counts.iter().map(|&(c, _)| c).collect();
            let distinct = colors.len();
            let mut i = 0;
            while colors.len() < k {
                colors.push(colors[i % distinct]);
                i += 1;
            }
            debug!(k, distinct, "fewer distinct colors than requested, padding");
            return Palette::from_colors(colors);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.seed_centroids(&samples, k, &mut rng);
        let iterations = self.lloyd(&samples, &mut centroids);
        debug!(k, iterations, samples = samples.len(), "k-means converged");

        Palette::from_colors(
            centroids
                .iter()
                .map(|c| {
                    Rgb::new(
                        c[0].round().clamp(0.0, 255.0) as u8,
                        c[1].round().clamp(0.0, 255.0) as u8,
                        c[2].round().clamp(0.0, 255.0) as u8,
                    )
                })
                .collect(),
        )
    }

    /// k-means++ initialization: each new centroid is drawn with
    /// probability proportional to squared distance from the nearest
    /// existing centroid.
    fn seed_centroids(&self, samples: &[[f64; 3]], k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
        let mut centroids = Vec::with_capacity(k);
        centroids.push(samples[rng.gen_range(0..samples.len())]);

        let mut dist = vec![f64::MAX; samples.len()];
        while centroids.len() < k {
            let last = centroids[centroids.len() - 1];
            for (d, s) in dist.iter_mut().zip(samples) {
                *d = d.min(distance_squared(s, &last));
            }
            let total: f64 = dist.iter().sum();
            let chosen = if total <= f64::EPSILON {
                // All samples coincide with a centroid already.
                rng.gen_range(0..samples.len())
            } else {
                let mut t = rng.gen::<f64>() * total;
                let mut chosen = samples.len() - 1;
                for (i, &d) in dist.iter().enumerate() {
                    t -= d;
                    if t <= 0.0 {
                        chosen = i;
                        break;
                    }
                }
                chosen
            };
            centroids.push(samples[chosen]);
        }
        centroids
    }

    /// Bounded Lloyd iteration. Returns the number of iterations run.
    fn lloyd(&self, samples: &[[f64; 3]], centroids: &mut [[f64; 3]]) -> u32 {
        let k = centroids.len();
        for iteration in 1..=self.max_iterations {
            let mut sums = vec![[0f64; 3]; k];
            let mut members = vec![0u64; k];
            for s in samples {
                let mut best = 0;
                let mut best_dist = f64::MAX;
                for (j, c) in centroids.iter().enumerate() {
                    let d = distance_squared(s, c);
                    if d < best_dist {
                        best_dist = d;
                        best = j;
                    }
                }
                for c in 0..3 {
                    sums[best][c] += s[c];
                }
                members[best] += 1;
            }

            let mut movement = 0.0;
            for j in 0..k {
                // Empty clusters keep their previous centroid.
                if members[j] == 0 {
                    continue;
                }
                let mean = [
                    sums[j][0] / members[j] as f64,
                    sums[j][1] / members[j] as f64,
                    sums[j][2] / members[j] as f64,
                ];
                movement += distance_squared(&centroids[j], &mean).sqrt();
                centroids[j] = mean;
            }
            if movement < self.epsilon {
                return iteration;
            }
        }
        self.max_iterations
    }
}

#[inline]
fn distance_squared(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}
