//! Block grid lines.

use rayon::prelude::*;

use crate::color::Rgb;
use crate::image::RgbImage;

/// Draw a 1-pixel line along the last row and last column of every
/// `block x block` cell.
///
/// ```
/// use pixel_stylize::{draw_grid_lines, Rgb, RgbImage};
///
/// let image = RgbImage::filled(4, 4, Rgb::BLACK).unwrap();
/// let out = draw_grid_lines(&image, 2, Rgb::WHITE);
/// assert_eq!(out.get(0, 0), Rgb::BLACK);
/// assert_eq!(out.get(1, 0), Rgb::WHITE);
/// assert_eq!(out.get(0, 3), Rgb::WHITE);
/// ```
pub fn draw_grid_lines(image: &RgbImage, block: usize, color: Rgb) -> RgbImage {
    let block = block.max(1);
    let w = image.width();
    let mut out = image.clone();
    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            let horizontal = y % block == block - 1;
            for (x, pixel) in row.iter_mut().enumerate() {
                if horizontal || x % block == block - 1 {
                    *pixel = color;
                }
            }
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_positions() {
        let image = RgbImage::filled(9, 9, Rgb::BLACK).unwrap();
        let out = draw_grid_lines(&image, 3, Rgb::WHITE);
        for y in 0..9 {
            for x in 0..9 {
                let expected = if x % 3 == 2 || y % 3 == 2 {
                    Rgb::WHITE
                } else {
                    Rgb::BLACK
                };
                assert_eq!(out.get(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_block_larger_than_image() {
        let image = RgbImage::filled(5, 5, Rgb::BLACK).unwrap();
        assert_eq!(draw_grid_lines(&image, 8, Rgb::WHITE), image);
    }
}
