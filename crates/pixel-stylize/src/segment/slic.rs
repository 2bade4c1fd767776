//! SLIC superpixel clustering.
//!
//! Centers are seeded on a regular grid, nudged to the lowest-gradient pixel
//! of their 3x3 neighborhood, then refined by local k-means in a combined
//! Lab + position space. Each center only competes for pixels inside a
//! window of `step` pixels around it.
//!
//! # Determinism
//!
//! Assignment runs in parallel over pixel rows, but each row visits its
//! candidate centers in ascending index order with a strict `<` comparison,
//! exactly as a sequential scan would. Center sums are accumulated over a
//! fixed number of row bands and merged in band order, so results do not
//! depend on the thread count.

use rayon::prelude::*;

use super::{Center, LabelMap, Segmentation};
use crate::color::{to_lab, Lab, LabImage, Rgb};
use crate::image::RgbImage;

/// Iteration stops once no center component moves more than this.
const CONVERGENCE_THRESHOLD: f64 = 0.5;

/// Number of row bands for partitioned reductions. Fixed so that the
/// floating-point summation order never changes.
const REDUCTION_BANDS: usize = 16;

/// Compactness at which color and spatial distance weigh equally.
const REFERENCE_COMPACTNESS: f64 = 10.0;

/// Configuration for [`segment`].
///
/// # Example
///
/// ```
/// use pixel_stylize::SlicOptions;
///
/// let options = SlicOptions::new(8).compactness(20.0).max_iterations(5);
/// assert_eq!(options.step, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlicOptions {
    /// Nominal superpixel edge length in pixels.
    ///
    /// Default: `16`
    pub step: usize,

    /// Spatial regularity. Higher values give squarer, more uniform
    /// superpixels; lower values follow color edges more closely.
    ///
    /// Default: `10.0`
    pub compactness: f64,

    /// Upper bound on refinement iterations.
    ///
    /// Default: `10`
    pub max_iterations: usize,
}

impl Default for SlicOptions {
    fn default() -> Self {
        Self {
            step: 16,
            compactness: REFERENCE_COMPACTNESS,
            max_iterations: 10,
        }
    }
}

impl SlicOptions {
    /// Options with the given step and default compactness and iterations.
    #[inline]
    pub fn new(step: usize) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    #[inline]
    pub fn compactness(mut self, compactness: f64) -> Self {
        self.compactness = compactness;
        self
    }

    #[inline]
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }
}

/// Running sums for one cluster.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    row: f64,
    col: f64,
    l: f64,
    a: f64,
    b: f64,
    count: usize,
}

impl Accumulator {
    #[inline]
    fn merge(&mut self, other: &Accumulator) {
        self.row += other.row;
        self.col += other.col;
        self.l += other.l;
        self.a += other.a;
        self.b += other.b;
        self.count += other.count;
    }
}

/// Segment an image into superpixels.
///
/// Always yields at least one center. Images smaller than `step` in either
/// dimension are handled (a warning is logged) by clamping the seed cells
/// to the image bounds.
///
/// # Example
///
/// ```
/// use pixel_stylize::{segment, Rgb, RgbImage, SlicOptions};
///
/// let image = RgbImage::filled(16, 16, Rgb::new(255, 0, 0)).unwrap();
/// let seg = segment(&image, &SlicOptions::new(4));
///
/// assert_eq!(seg.centers.len(), 16);
/// assert!(seg.labels.check(seg.centers.len()).is_ok());
/// assert!(seg.image.pixels().iter().all(|&p| p == Rgb::new(255, 0, 0)));
/// ```
pub fn segment(image: &RgbImage, options: &SlicOptions) -> Segmentation {
    let (width, height) = (image.width(), image.height());
    // A step past the longer side still yields one seed and a window
    // covering the whole image, so clamping changes no assignment.
    let step = options.step.clamp(1, width.max(height).max(1));

    if width < options.step || height < options.step {
        tracing::warn!(
            width,
            height,
            step = options.step,
            "image smaller than superpixel step, using clamped cells"
        );
    }

    let lab = to_lab(image);
    let mut centers = seed_centers(&lab, step);
    let mut labels = vec![0u32; width * height];

    let spatial_weight = (options.compactness / REFERENCE_COMPACTNESS).powi(2);
    let norm = 1.0 / (step as f64 * step as f64);

    for iteration in 0..options.max_iterations {
        assign(&lab, &centers, step, spatial_weight, norm, &mut labels);
        let updated = update_centers(&lab, &labels, &centers);
        let shift = max_shift(&centers, &updated);
        centers = updated;

        tracing::debug!(iteration, shift, centers = centers.len(), "slic iteration");
        if shift < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    let recolored = recolor(image, &labels, centers.len());
    Segmentation {
        labels: LabelMap::new(width, height, labels),
        centers,
        image: recolored,
    }
}

/// Gradient at `(x, y)`: absolute Lab differences between the horizontal
/// and the vertical neighbor pairs, neighbor coordinates clamped to the
/// image.
fn gradient(lab: &LabImage, x: usize, y: usize) -> f64 {
    let (w, h) = (lab.width(), lab.height());
    let (xm, xp) = (x.saturating_sub(1), (x + 1).min(w - 1));
    let (ym, yp) = (y.saturating_sub(1), (y + 1).min(h - 1));
    lab.get(xp, y).manhattan(lab.get(xm, y)) + lab.get(x, yp).manhattan(lab.get(x, ym))
}

/// One seed per cell of a `ceil(h/step) x ceil(w/step)` grid.
fn seed_centers(lab: &LabImage, step: usize) -> Vec<Center> {
    let (w, h) = (lab.width(), lab.height());
    let rows = h.div_ceil(step);
    let cols = w.div_ceil(step);
    let mut centers = Vec::with_capacity(rows * cols);

    for gy in 0..rows {
        let y0 = gy * step;
        let cy = y0 + ((y0 + step).min(h) - y0) / 2;
        for gx in 0..cols {
            let x0 = gx * step;
            let cx = x0 + ((x0 + step).min(w) - x0) / 2;

            let mut best = (cx, cy);
            let mut best_grad = f64::INFINITY;
            for ny in cy.saturating_sub(1)..=(cy + 1).min(h - 1) {
                for nx in cx.saturating_sub(1)..=(cx + 1).min(w - 1) {
                    let g = gradient(lab, nx, ny);
                    if g < best_grad {
                        best_grad = g;
                        best = (nx, ny);
                    }
                }
            }

            centers.push(Center {
                row: best.1 as f64,
                col: best.0 as f64,
                color: lab.get(best.0, best.1),
                count: 0,
            });
        }
    }
    centers
}

/// Search window `[lo, hi)` on one axis around a center coordinate.
#[inline]
fn window(center: f64, step: usize, limit: usize) -> (usize, usize) {
    let c = center.max(0.0) as usize;
    (c.saturating_sub(step), (c + step).min(limit))
}

fn assign(
    lab: &LabImage,
    centers: &[Center],
    step: usize,
    spatial_weight: f64,
    norm: f64,
    labels: &mut [u32],
) {
    let (w, h) = (lab.width(), lab.height());

    // Candidate centers per row, in ascending index order
    let mut row_candidates: Vec<Vec<u32>> = vec![Vec::new(); h];
    for (k, center) in centers.iter().enumerate() {
        let (y_lo, y_hi) = window(center.row, step, h);
        for candidates in &mut row_candidates[y_lo..y_hi] {
            candidates.push(k as u32);
        }
    }

    labels
        .par_chunks_mut(w)
        .zip(row_candidates.par_iter())
        .enumerate()
        .for_each(|(y, (row_labels, candidates))| {
            let mut best = vec![f64::INFINITY; w];
            for &k in candidates {
                let center = &centers[k as usize];
                let (x_lo, x_hi) = window(center.col, step, w);
                let dy = y as f64 - center.row;
                for x in x_lo..x_hi {
                    let dc = lab.get(x, y).distance_squared(center.color);
                    let dx = x as f64 - center.col;
                    let ds = dx * dx + dy * dy;
                    let d = (dc + spatial_weight * ds) * norm;
                    if d < best[x] {
                        best[x] = d;
                        row_labels[x] = k;
                    }
                }
            }
        });
}

/// Row ranges of the fixed reduction bands.
fn bands(height: usize) -> Vec<(usize, usize)> {
    let band_rows = height.div_ceil(REDUCTION_BANDS).max(1);
    (0..height)
        .step_by(band_rows)
        .map(|y0| (y0, (y0 + band_rows).min(height)))
        .collect()
}

fn update_centers(lab: &LabImage, labels: &[u32], previous: &[Center]) -> Vec<Center> {
    let w = lab.width();

    let partials: Vec<Vec<Accumulator>> = bands(lab.height())
        .into_par_iter()
        .map(|(y0, y1)| {
            let mut acc = vec![Accumulator::default(); previous.len()];
            for y in y0..y1 {
                for x in 0..w {
                    let a = &mut acc[labels[y * w + x] as usize];
                    let c = lab.get(x, y);
                    a.row += y as f64;
                    a.col += x as f64;
                    a.l += c.l;
                    a.a += c.a;
                    a.b += c.b;
                    a.count += 1;
                }
            }
            acc
        })
        .collect();

    let mut totals = vec![Accumulator::default(); previous.len()];
    for partial in &partials {
        for (total, p) in totals.iter_mut().zip(partial) {
            total.merge(p);
        }
    }

    totals
        .iter()
        .zip(previous)
        .map(|(t, prev)| {
            if t.count == 0 {
                return Center { count: 0, ..*prev };
            }
            let n = t.count as f64;
            Center {
                row: t.row / n,
                col: t.col / n,
                color: Lab::new(t.l / n, t.a / n, t.b / n),
                count: t.count,
            }
        })
        .collect()
}

fn max_shift(old: &[Center], new: &[Center]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(o, n)| {
            (o.row - n.row)
                .abs()
                .max((o.col - n.col).abs())
                .max((o.color.l - n.color.l).abs())
                .max((o.color.a - n.color.a).abs())
                .max((o.color.b - n.color.b).abs())
        })
        .fold(0.0, f64::max)
}

/// Replace each pixel with the mean original RGB of its cluster.
fn recolor(image: &RgbImage, labels: &[u32], num_centers: usize) -> RgbImage {
    let w = image.width();

    let partials: Vec<Vec<[u64; 4]>> = bands(image.height())
        .into_par_iter()
        .map(|(y0, y1)| {
            let mut sums = vec![[0u64; 4]; num_centers];
            for y in y0..y1 {
                for (x, p) in image.row(y).iter().enumerate() {
                    let s = &mut sums[labels[y * w + x] as usize];
                    s[0] += p.r as u64;
                    s[1] += p.g as u64;
                    s[2] += p.b as u64;
                    s[3] += 1;
                }
            }
            sums
        })
        .collect();

    let mut totals = vec![[0u64; 4]; num_centers];
    for partial in &partials {
        for (total, p) in totals.iter_mut().zip(partial) {
            for c in 0..4 {
                total[c] += p[c];
            }
        }
    }

    let means: Vec<Rgb> = totals
        .iter()
        .map(|s| {
            let n = s[3].max(1);
            let mean = |v: u64| ((v + n / 2) / n) as u8;
            Rgb::new(mean(s[0]), mean(s[1]), mean(s[2]))
        })
        .collect();

    let pixels = labels.par_iter().map(|&l| means[l as usize]).collect();
    image.with_pixels(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: usize, height: usize) -> RgbImage {
        let pixels = (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                Rgb::new((x * 255 / width) as u8, (y * 255 / height) as u8, 96)
            })
            .collect();
        RgbImage::from_pixels(width, height, pixels).unwrap()
    }

    fn two_tone(width: usize, height: usize) -> RgbImage {
        let pixels = (0..width * height)
            .map(|i| {
                if i % width < width / 2 {
                    Rgb::new(20, 40, 200)
                } else {
                    Rgb::new(230, 200, 10)
                }
            })
            .collect();
        RgbImage::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_default_options() {
        let opts = SlicOptions::default();
        assert_eq!(opts.step, 16);
        assert_eq!(opts.compactness, 10.0);
        assert_eq!(opts.max_iterations, 10);
    }

    #[test]
    fn test_seed_count_is_ceil_grid() {
        let image = gradient_image(10, 17);
        let seg = segment(&image, &SlicOptions::new(4));
        // ceil(17/4) * ceil(10/4) = 5 * 3
        assert_eq!(seg.centers.len(), 15);
    }

    #[test]
    fn test_labels_in_range_and_shape() {
        let image = gradient_image(37, 23);
        let seg = segment(&image, &SlicOptions::new(6));
        assert_eq!(seg.labels.width(), 37);
        assert_eq!(seg.labels.height(), 23);
        assert_eq!(seg.labels.labels().len(), 37 * 23);
        assert!(seg.labels.check(seg.centers.len()).is_ok());
    }

    #[test]
    fn test_single_pixel_image() {
        let image = RgbImage::filled(1, 1, Rgb::new(9, 8, 7)).unwrap();
        let seg = segment(&image, &SlicOptions::new(16));
        assert_eq!(seg.centers.len(), 1);
        assert_eq!(seg.labels.labels(), &[0]);
        assert_eq!(seg.image.get(0, 0), Rgb::new(9, 8, 7));
    }

    #[test]
    fn test_image_smaller_than_step() {
        let image = gradient_image(5, 3);
        let seg = segment(&image, &SlicOptions::new(32));
        assert_eq!(seg.centers.len(), 1);
        assert!(seg.labels.check(1).is_ok());
    }

    #[test]
    fn test_step_one_keeps_uniform_image() {
        let image = RgbImage::filled(6, 5, Rgb::new(12, 34, 56)).unwrap();
        let seg = segment(&image, &SlicOptions::new(1).compactness(5.0));
        assert_eq!(seg.image, image);
    }

    #[test]
    fn test_deterministic() {
        let image = gradient_image(48, 40);
        let opts = SlicOptions::new(8).compactness(15.0);
        let a = segment(&image, &opts);
        let b = segment(&image, &opts);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.centers, b.centers);
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn test_recolor_uses_cluster_means() {
        let image = two_tone(16, 8);
        let seg = segment(&image, &SlicOptions::new(8));
        // Clusters never straddle the sharp vertical edge
        for y in 0..8 {
            assert_eq!(seg.image.get(0, y), Rgb::new(20, 40, 200));
            assert_eq!(seg.image.get(15, y), Rgb::new(230, 200, 10));
        }
    }

    #[test]
    fn test_recolored_colors_bounded_by_centers() {
        let image = gradient_image(32, 32);
        let seg = segment(&image, &SlicOptions::new(8));
        assert!(seg.image.distinct_colors() <= seg.centers.len());
    }

    #[test]
    fn test_zero_iterations_labels_everything_zero() {
        let image = gradient_image(8, 8);
        let seg = segment(&image, &SlicOptions::new(4).max_iterations(0));
        assert!(seg.labels.labels().iter().all(|&l| l == 0));
        assert!(seg.labels.check(seg.centers.len()).is_ok());
    }

    /// 5x5 ramp `L = 10x + 10y` with four border pixels edited so that
    /// candidate (3,3) has the smallest absolute-difference gradient (5)
    /// while candidate (1,1) would win under a squared distance (18 < 25).
    fn seed_trap() -> LabImage {
        let mut pixels: Vec<Lab> = (0..25)
            .map(|i| Lab::new(10.0 * (i % 5) as f64 + 10.0 * (i / 5) as f64, 0.0, 0.0))
            .collect();
        // (1,1): horizontal pair differs by (0, 3, 3), vertical pair by 0
        pixels[5] = Lab::new(30.0, -3.0, -3.0);
        pixels[1] = Lab::new(30.0, 0.0, 0.0);
        // (3,3): horizontal pair differs by (5, 0, 0), vertical pair by 0
        pixels[3 * 5 + 4] = Lab::new(55.0, 0.0, 0.0);
        pixels[4 * 5 + 3] = Lab::new(50.0, 0.0, 0.0);
        LabImage::from_pixels(5, 5, pixels)
    }

    #[test]
    fn test_gradient_sums_absolute_differences() {
        let lab = seed_trap();
        assert_eq!(gradient(&lab, 1, 1), 6.0);
        assert_eq!(gradient(&lab, 3, 3), 5.0);
        // Untouched interior pixels see the plain ramp: 20 + 20
        assert_eq!(gradient(&lab, 2, 2), 40.0);
        // Border pixels clamp their missing neighbor to themselves
        assert_eq!(gradient(&lab, 0, 4), 10.0 + 10.0);
    }

    #[test]
    fn test_seed_moves_to_lowest_gradient_pixel() {
        let seeds = seed_centers(&seed_trap(), 5);
        assert_eq!(seeds.len(), 1);
        assert_eq!((seeds[0].col, seeds[0].row), (3.0, 3.0));
        assert_eq!(seeds[0].color, Lab::new(60.0, 0.0, 0.0));
    }

    #[test]
    fn test_seed_stays_put_on_flat_image() {
        // All gradients tie at zero: the first pixel of the 3x3 scan wins
        let lab = to_lab(&RgbImage::filled(8, 8, Rgb::new(50, 60, 70)).unwrap());
        let seeds = seed_centers(&lab, 4);
        let positions: Vec<_> = seeds.iter().map(|c| (c.col, c.row)).collect();
        assert_eq!(positions, vec![(1.0, 1.0), (5.0, 1.0), (1.0, 5.0), (5.0, 5.0)]);
    }

    #[test]
    fn test_huge_step_does_not_overflow() {
        let image = gradient_image(4, 4);
        let seg = segment(&image, &SlicOptions::new(usize::MAX));
        assert_eq!(seg.centers.len(), 1);
        assert_eq!(seg.labels, segment(&image, &SlicOptions::new(4)).labels);
    }

    #[test]
    fn test_bands_cover_all_rows() {
        for height in [1, 5, 16, 17, 100] {
            let bands = bands(height);
            assert_eq!(bands.first().map(|b| b.0), Some(0));
            assert_eq!(bands.last().map(|b| b.1), Some(height));
            for pair in bands.windows(2) {
                assert_eq!(pair[0].1, pair[1].0);
            }
        }
    }
}
