//! Separable Gaussian blur.

use rayon::prelude::*;

use crate::image::RgbImage;

/// Kernel half-width, in standard deviations.
const TRUNCATE: f32 = 4.0;

/// Normalized weights for offsets `-radius..=radius`.
fn kernel(sigma: f32) -> Vec<f32> {
    let radius = (TRUNCATE * sigma + 0.5) as isize;
    let weights: Vec<f32> = (-radius..=radius)
        .map(|i| (-0.5 * (i as f32 / sigma).powi(2)).exp())
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Blur every channel with a Gaussian of standard deviation `sigma`.
///
/// Samples past the border repeat the edge pixel. The result is left
/// unrounded so callers can blend before quantizing back to 8 bits. A
/// non-positive `sigma` returns the channels unchanged.
pub(crate) fn gaussian_blur(image: &RgbImage, sigma: f32) -> Vec<[f32; 3]> {
    let (w, h) = (image.width(), image.height());
    let source: Vec<[f32; 3]> = image.pixels().iter().map(|p| p.to_f32()).collect();
    if sigma.is_nan() || sigma <= 0.0 {
        return source;
    }
    let weights = kernel(sigma);
    let radius = weights.len() / 2;

    let mut horizontal = vec![[0.0f32; 3]; w * h];
    horizontal
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            let src = &source[y * w..(y + 1) * w];
            for (x, out) in row.iter_mut().enumerate() {
                let mut acc = [0.0f32; 3];
                for (k, &weight) in weights.iter().enumerate() {
                    let s = src[(x + k).saturating_sub(radius).min(w - 1)];
                    for c in 0..3 {
                        acc[c] += weight * s[c];
                    }
                }
                *out = acc;
            }
        });

    let mut blurred = vec![[0.0f32; 3]; w * h];
    blurred
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut acc = [0.0f32; 3];
                for (k, &weight) in weights.iter().enumerate() {
                    let sy = (y + k).saturating_sub(radius).min(h - 1);
                    let s = horizontal[sy * w + x];
                    for c in 0..3 {
                        acc[c] += weight * s[c];
                    }
                }
                *out = acc;
            }
        });
    blurred
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        let k = kernel(1.0);
        assert_eq!(k.len(), 9);
        assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        for i in 0..k.len() / 2 {
            assert_eq!(k[i], k[k.len() - 1 - i]);
        }
        assert!(k[4] > k[3]);
    }

    #[test]
    fn test_flat_image_unchanged() {
        let image = RgbImage::filled(7, 5, Rgb::new(90, 120, 30)).unwrap();
        for px in gaussian_blur(&image, 1.5) {
            assert!((px[0] - 90.0).abs() < 1e-3);
            assert!((px[1] - 120.0).abs() < 1e-3);
            assert!((px[2] - 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let image = RgbImage::from_pixels(2, 1, vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        assert_eq!(
            gaussian_blur(&image, 0.0),
            vec![[0.0; 3], [255.0; 3]]
        );
    }

    #[test]
    fn test_step_edge_is_softened() {
        let pixels = (0..8).map(|x| if x < 4 { Rgb::BLACK } else { Rgb::WHITE }).collect();
        let image = RgbImage::from_pixels(8, 1, pixels).unwrap();
        let out = gaussian_blur(&image, 1.0);
        assert!(out[3][0] > 0.0 && out[3][0] < 127.5);
        assert!(out[4][0] > 127.5 && out[4][0] < 255.0);
        // Replicated edges keep the far ends close to their own value
        assert!(out[0][0] < 1.0);
        assert!(out[7][0] > 254.0);
    }
}
