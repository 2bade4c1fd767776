//! Dilated-mask outline ring.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::{Jitter, OutlineOptions};
use crate::image::RgbImage;

/// Mask covering every full `block x block` cell, shifted by jitter.
fn block_mask(width: usize, height: usize, block: usize, jitter: Jitter) -> Vec<bool> {
    let mut mask = vec![false; width * height];
    let cells_y = height / block;
    let cells_x = width / block;
    let mut rng = match jitter {
        Jitter::Disabled => None,
        Jitter::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
    };

    for gy in 0..cells_y {
        for gx in 0..cells_x {
            let interior = gy > 0 && gy + 1 < cells_y && gx > 0 && gx + 1 < cells_x;
            let (oy, ox) = match rng.as_mut() {
                Some(rng) if interior => (rng.gen_range(-1..=1), rng.gen_range(-1..=1)),
                _ => (0isize, 0isize),
            };

            let y0 = ((gy * block) as isize + oy).clamp(0, height as isize) as usize;
            let x0 = ((gx * block) as isize + ox).clamp(0, width as isize) as usize;
            let y1 = (y0 + block).min(height);
            let x1 = (x0 + block).min(width);
            for y in y0..y1 {
                mask[y * width + x0..y * width + x1].fill(true);
            }
        }
    }
    mask
}

/// Paint the ring between the block mask and its dilation.
///
/// The mask is dilated by `thickness` pixels along the four axis directions;
/// pixels in the dilation but not in the mask take the outline color. All
/// other pixels are unchanged. With jitter disabled, the mask covers every
/// full block, so the ring only appears along partial blocks at the right
/// and bottom edges; jitter opens seams between cells that become lines.
///
/// # Example
///
/// ```
/// use pixel_stylize::{draw_outline, OutlineOptions, Rgb, RgbImage};
///
/// // 10x10 with 4px blocks: full cells cover 8x8, the ring fills the rest
/// let image = RgbImage::filled(10, 10, Rgb::WHITE).unwrap();
/// let out = draw_outline(&image, 4, &OutlineOptions::new().thickness(1));
///
/// assert_eq!(out.get(0, 0), Rgb::WHITE);
/// assert_eq!(out.get(8, 0), Rgb::new(30, 30, 30));
/// assert_eq!(out.get(9, 0), Rgb::WHITE);
/// ```
pub fn draw_outline(image: &RgbImage, block: usize, options: &OutlineOptions) -> RgbImage {
    let block = block.max(1);
    let (w, h) = (image.width(), image.height());
    let t = options.thickness;
    let mask = block_mask(w, h, block, options.jitter);

    let at = |x: isize, y: isize| -> bool {
        x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h && mask[y as usize * w + x as usize]
    };

    let mut out = image.clone();
    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                if mask[y * w + x] {
                    continue;
                }
                let (xi, yi) = (x as isize, y as isize);
                let in_ring = (1..=t as isize).any(|d| {
                    at(xi - d, yi) || at(xi + d, yi) || at(xi, yi - d) || at(xi, yi + d)
                });
                if in_ring {
                    *pixel = options.color;
                }
            }
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    const OUTLINE: Rgb = Rgb::new(30, 30, 30);

    #[test]
    fn test_mask_covers_full_blocks() {
        let mask = block_mask(10, 6, 4, Jitter::Disabled);
        // Cells cover x in 0..8, y in 0..4
        assert!(mask[0]);
        assert!(mask[3 * 10 + 7]);
        assert!(!mask[8]);
        assert!(!mask[4 * 10]);
    }

    #[test]
    fn test_exact_multiple_has_no_ring_without_jitter() {
        let image = RgbImage::filled(12, 12, Rgb::WHITE).unwrap();
        let out = draw_outline(&image, 4, &OutlineOptions::default());
        assert_eq!(out, image);
    }

    #[test]
    fn test_ring_width_follows_thickness() {
        let image = RgbImage::filled(16, 4, Rgb::WHITE).unwrap();
        // Shorter than one block: no full cells, so no mask and no ring
        let out = draw_outline(&image, 8, &OutlineOptions::new().thickness(2));
        assert_eq!(out, image);

        let image = RgbImage::filled(14, 8, Rgb::WHITE).unwrap();
        let out = draw_outline(&image, 8, &OutlineOptions::new().thickness(2));
        // Mask covers x in 0..8; ring is x = 8, 9
        for y in 0..8 {
            assert_eq!(out.get(7, y), Rgb::WHITE);
            assert_eq!(out.get(8, y), OUTLINE);
            assert_eq!(out.get(9, y), OUTLINE);
            assert_eq!(out.get(10, y), Rgb::WHITE);
        }
    }

    #[test]
    fn test_image_smaller_than_block_unchanged() {
        let image = RgbImage::filled(3, 3, Rgb::WHITE).unwrap();
        assert_eq!(draw_outline(&image, 8, &OutlineOptions::default()), image);
    }

    #[test]
    fn test_seeded_jitter_reproducible() {
        let image = RgbImage::filled(40, 40, Rgb::WHITE).unwrap();
        let opts = OutlineOptions::new().jitter(Jitter::Seeded(5));
        assert_eq!(draw_outline(&image, 8, &opts), draw_outline(&image, 8, &opts));
    }

    #[test]
    fn test_jitter_only_touches_interior_cells() {
        let a = block_mask(32, 32, 8, Jitter::Seeded(1));
        let b = block_mask(32, 32, 8, Jitter::Disabled);
        // Top-left cell is a border cell and never moves
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(a[y * 32 + x], b[y * 32 + x]);
            }
        }
    }

    #[test]
    fn test_outline_only_recolors_ring() {
        let pixels = (0..100).map(|i| Rgb::new(i as u8, 0, 0)).collect();
        let image = RgbImage::from_pixels(10, 10, pixels).unwrap();
        let out = draw_outline(&image, 4, &OutlineOptions::new().jitter(Jitter::Seeded(3)));
        for (a, b) in image.pixels().iter().zip(out.pixels()) {
            assert!(a == b || *b == OUTLINE);
        }
    }
}
