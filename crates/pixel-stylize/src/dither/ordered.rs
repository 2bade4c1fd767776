//! 4x4 Bayer ordered dithering.

use rayon::prelude::*;

use super::quantize_level;
use crate::color::Rgb;
use crate::image::RgbImage;

/// Classic 4x4 Bayer index matrix, values 0..16.
const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Threshold offset in `[-0.5, 0.4375]` for a pixel position.
#[inline]
fn threshold(x: usize, y: usize) -> f32 {
    BAYER_4X4[y % 4][x % 4] as f32 / 16.0 - 0.5
}

/// Offset each channel by the position's threshold, scaled to one output
/// level, then quantize to `levels` per channel.
pub(crate) fn bayer(image: &RgbImage, levels: u32) -> RgbImage {
    let width = image.width();
    let step = 255.0 / (levels - 1) as f32;

    let pixels = image
        .pixels()
        .par_iter()
        .enumerate()
        .map(|(i, p)| {
            let t = threshold(i % width, i / width) * step;
            let c = p.to_f32();
            Rgb::from_f32_clamped([
                quantize_level(c[0] + t, levels),
                quantize_level(c[1] + t, levels),
                quantize_level(c[2] + t, levels),
            ])
        })
        .collect();
    image.with_pixels(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_is_permutation() {
        let mut seen = [false; 16];
        for row in BAYER_4X4 {
            for v in row {
                seen[v as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_threshold_range() {
        assert_eq!(threshold(0, 0), -0.5);
        assert_eq!(threshold(0, 3), 15.0 / 16.0 - 0.5);
        assert_eq!(threshold(4, 4), threshold(0, 0));
    }

    #[test]
    fn test_mid_gray_gives_half_coverage() {
        let image = RgbImage::filled(8, 8, Rgb::new(128, 128, 128)).unwrap();
        let out = bayer(&image, 2);
        let white = out.pixels().iter().filter(|&&p| p == Rgb::WHITE).count();
        let black = out.pixels().iter().filter(|&&p| p == Rgb::BLACK).count();
        assert_eq!(white + black, 64);
        assert_eq!(white, 32);
    }

    #[test]
    fn test_extremes_are_stable() {
        let black = RgbImage::filled(4, 4, Rgb::BLACK).unwrap();
        assert_eq!(bayer(&black, 2), black);
        let white = RgbImage::filled(4, 4, Rgb::WHITE).unwrap();
        assert_eq!(bayer(&white, 2), white);
    }
}
