//! Mini-batch k-means quantization.
//!
//! Centroids are initialized with k-means++ on a random sample, refined by
//! a fixed number of mini-batch updates with per-centroid learning rates
//! (`1 / hits`), then every pixel is assigned to its nearest centroid.
//! All randomness comes from a seeded generator, so equal inputs and seeds
//! give equal outputs.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::QuantizeSpace;
use crate::color::{Lab, Rgb};
use crate::image::RgbImage;

type Point = [f64; 3];

/// Configuration for [`kmeans`].
///
/// # Example
///
/// ```
/// use pixel_stylize::{KMeansOptions, QuantizeSpace};
///
/// let options = KMeansOptions::new().space(QuantizeSpace::Lab).seed(7);
/// assert_eq!(options.batch_size, 4096);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansOptions {
    /// Distance space for clustering.
    ///
    /// Default: [`QuantizeSpace::Rgb`]
    pub space: QuantizeSpace,

    /// Seed for sampling and initialization.
    ///
    /// Default: `42`
    pub seed: u64,

    /// Pixels drawn per mini-batch.
    ///
    /// Default: `4096`
    pub batch_size: usize,

    /// Number of mini-batches.
    ///
    /// Default: `100`
    pub iterations: usize,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            space: QuantizeSpace::Rgb,
            seed: 42,
            batch_size: 4096,
            iterations: 100,
        }
    }
}

impl KMeansOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn space(mut self, space: QuantizeSpace) -> Self {
        self.space = space;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[inline]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

#[inline]
fn distance_squared(a: &Point, b: &Point) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    d0 * d0 + d1 * d1 + d2 * d2
}

/// Index of the nearest centroid; ties go to the lowest index.
#[inline]
fn nearest(centroids: &[Point], p: &Point) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = distance_squared(c, p);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

fn to_point(color: Rgb, space: QuantizeSpace) -> Point {
    match space {
        QuantizeSpace::Rgb => [color.r as f64, color.g as f64, color.b as f64],
        QuantizeSpace::Lab => {
            let lab = Lab::from(color);
            [lab.l, lab.a, lab.b]
        }
    }
}

fn to_rgb(p: &Point, space: QuantizeSpace) -> Rgb {
    match space {
        QuantizeSpace::Rgb => {
            Rgb::from_f32_clamped([p[0] as f32, p[1] as f32, p[2] as f32])
        }
        QuantizeSpace::Lab => Lab::new(p[0], p[1], p[2]).to_rgb(),
    }
}

/// k-means++ seeding over `sample`.
fn init_centroids(sample: &[Point], k: usize, rng: &mut StdRng) -> Vec<Point> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(sample[rng.gen_range(0..sample.len())]);

    let mut dists: Vec<f64> = sample
        .iter()
        .map(|p| distance_squared(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = dists.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = dists.len() - 1;
            for (i, d) in dists.iter().enumerate() {
                if target < *d {
                    chosen = i;
                    break;
                }
                target -= d;
            }
            sample[chosen]
        } else {
            sample[rng.gen_range(0..sample.len())]
        };

        centroids.push(next);
        for (d, p) in dists.iter_mut().zip(sample) {
            *d = d.min(distance_squared(p, &next));
        }
    }
    centroids
}

/// Quantize to at most `k` colors with mini-batch k-means.
///
/// Images that already have `k` or fewer distinct colors are returned
/// unchanged.
pub fn kmeans(image: &RgbImage, k: usize, options: &KMeansOptions) -> RgbImage {
    let k = k.max(1);
    let distinct: HashSet<Rgb> = image.pixels().iter().copied().collect();
    if distinct.len() <= k {
        return image.clone();
    }

    let space = options.space;
    let points: Vec<Point> = image
        .pixels()
        .par_iter()
        .map(|&p| to_point(p, space))
        .collect();
    let n = points.len();
    let batch_size = options.batch_size.clamp(1, n);

    let mut rng = StdRng::seed_from_u64(options.seed);
    let sample: Vec<Point> = (0..batch_size)
        .map(|_| points[rng.gen_range(0..n)])
        .collect();
    let mut centroids = init_centroids(&sample, k, &mut rng);
    let mut hits = vec![0u64; k];

    for _ in 0..options.iterations {
        let batch: Vec<usize> = (0..batch_size).map(|_| rng.gen_range(0..n)).collect();
        let assigned: Vec<usize> = batch
            .par_iter()
            .map(|&i| nearest(&centroids, &points[i]))
            .collect();

        for (&i, &c) in batch.iter().zip(&assigned) {
            hits[c] += 1;
            let eta = 1.0 / hits[c] as f64;
            for d in 0..3 {
                centroids[c][d] += eta * (points[i][d] - centroids[c][d]);
            }
        }
    }

    let colors: Vec<Rgb> = centroids.iter().map(|c| to_rgb(c, space)).collect();
    tracing::debug!(k, distinct = distinct.len(), ?space, "k-means converged");

    let pixels = points
        .par_iter()
        .map(|p| colors[nearest(&centroids, p)])
        .collect();
    image.with_pixels(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy(width: usize, height: usize) -> RgbImage {
        let mut rng = StdRng::seed_from_u64(1);
        let pixels = (0..width * height)
            .map(|_| Rgb::new(rng.gen(), rng.gen(), rng.gen()))
            .collect();
        RgbImage::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_default_options() {
        let opts = KMeansOptions::default();
        assert_eq!(opts.space, QuantizeSpace::Rgb);
        assert_eq!(opts.seed, 42);
        assert_eq!(opts.batch_size, 4096);
        assert_eq!(opts.iterations, 100);
    }

    #[test]
    fn test_builder_chaining() {
        let opts = KMeansOptions::new()
            .space(QuantizeSpace::Lab)
            .seed(9)
            .batch_size(128)
            .iterations(3);
        assert_eq!(opts.space, QuantizeSpace::Lab);
        assert_eq!(opts.seed, 9);
        assert_eq!(opts.batch_size, 128);
        assert_eq!(opts.iterations, 3);
    }

    #[test]
    fn test_at_most_k_colors() {
        let image = noisy(40, 30);
        for k in [2, 5, 16] {
            let out = kmeans(&image, k, &KMeansOptions::default().iterations(20));
            assert!(out.distinct_colors() <= k, "k={k}");
            assert_eq!(out.width(), 40);
            assert_eq!(out.height(), 30);
        }
    }

    #[test]
    fn test_lab_space_at_most_k_colors() {
        let image = noisy(20, 20);
        let opts = KMeansOptions::default().space(QuantizeSpace::Lab).iterations(10);
        assert!(kmeans(&image, 8, &opts).distinct_colors() <= 8);
    }

    #[test]
    fn test_few_colors_unchanged() {
        let pixels = (0..24)
            .map(|i| if i % 3 == 0 { Rgb::BLACK } else { Rgb::new(255, 0, 0) })
            .collect();
        let image = RgbImage::from_pixels(6, 4, pixels).unwrap();
        assert_eq!(kmeans(&image, 2, &KMeansOptions::default()), image);
    }

    #[test]
    fn test_single_color_image() {
        let image = RgbImage::filled(16, 16, Rgb::new(255, 0, 0)).unwrap();
        assert_eq!(kmeans(&image, 8, &KMeansOptions::default()), image);
    }

    #[test]
    fn test_seeded_determinism() {
        let image = noisy(32, 32);
        let opts = KMeansOptions::default().iterations(10);
        assert_eq!(kmeans(&image, 6, &opts), kmeans(&image, 6, &opts));
    }

    #[test]
    fn test_separates_two_clusters() {
        let pixels = (0..100)
            .map(|i| {
                let jitter = (i % 5) as u8;
                if i < 50 {
                    Rgb::new(10 + jitter, 10, 10)
                } else {
                    Rgb::new(240 - jitter, 240, 240)
                }
            })
            .collect();
        let image = RgbImage::from_pixels(10, 10, pixels).unwrap();
        let out = kmeans(&image, 2, &KMeansOptions::default().iterations(20));
        assert_eq!(out.distinct_colors(), 2);
        assert!(out.get(0, 0).r < 20);
        assert!(out.get(9, 9).r > 230);
    }
}
