//! Exact block alignment.

use rayon::prelude::*;

use crate::color::Rgb;
use crate::image::RgbImage;

/// Replace every `step x step` block with its mean color.
///
/// The image is conceptually zero-padded up to a multiple of `step`, and
/// each block's mean always divides by `step * step`, so partial blocks on
/// the right and bottom edges are darkened by the padding. The result is
/// cropped back to the original size.
///
/// # Example
///
/// ```
/// use pixel_stylize::{align_to_grid, Rgb, RgbImage};
///
/// let image = RgbImage::filled(8, 8, Rgb::new(40, 80, 120)).unwrap();
/// assert_eq!(align_to_grid(&image, 4), image);
/// ```
pub fn align_to_grid(image: &RgbImage, step: usize) -> RgbImage {
    let step = step.max(1);
    let (w, h) = (image.width(), image.height());
    let blocks_x = w.div_ceil(step);
    let blocks_y = h.div_ceil(step);
    let area = (step as u64).saturating_mul(step as u64);

    if w < step || h < step {
        tracing::warn!(width = w, height = h, step, "image smaller than grid block");
    }

    let means: Vec<Rgb> = (0..blocks_x * blocks_y)
        .into_par_iter()
        .map(|b| {
            let (bx, by) = (b % blocks_x, b / blocks_x);
            let x0 = bx * step;
            let x1 = (x0 + step).min(w);
            let mut sum = [0u64; 3];
            for y in by * step..((by + 1) * step).min(h) {
                for p in &image.row(y)[x0..x1] {
                    sum[0] += p.r as u64;
                    sum[1] += p.g as u64;
                    sum[2] += p.b as u64;
                }
            }
            let mean = |v: u64| ((v + area / 2) / area) as u8;
            Rgb::new(mean(sum[0]), mean(sum[1]), mean(sum[2]))
        })
        .collect();

    let pixels = (0..w * h)
        .into_par_iter()
        .map(|i| {
            let (x, y) = (i % w, i / w);
            means[(y / step) * blocks_x + x / step]
        })
        .collect();
    image.with_pixels(pixels)
}
