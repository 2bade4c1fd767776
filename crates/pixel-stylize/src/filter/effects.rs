//! Edge smoothing, edge hardening and the cartoon overlay.

use rayon::prelude::*;

use super::blur::gaussian_blur;
use crate::color::Rgb;
use crate::image::RgbImage;

/// Blur standard deviation per unit of smoothing factor.
const SMOOTHING_SIGMA_PER_UNIT: f32 = 0.5;

/// Blur standard deviation of the hardening unsharp mask.
const HARDEN_SIGMA: f32 = 1.0;

/// Weight of the edge layer in [`cartoon`].
pub const CARTOON_EDGE_WEIGHT: f32 = 0.3;

fn lerp(from: [f32; 3], to: [f32; 3], t: f32) -> Rgb {
    Rgb::from_f32_clamped([
        from[0] + t * (to[0] - from[0]),
        from[1] + t * (to[1] - from[1]),
        from[2] + t * (to[2] - from[2]),
    ])
}

/// Blend `image` toward a Gaussian blur of itself.
///
/// The blur radius grows with `factor` (sigma = `factor / 2`) and `factor`
/// is also the blend weight, so `0.0` returns an exact copy and `1.0` gives
/// the fully blurred image. Blurring introduces in-between colors: run it
/// after any stage that depends on an exact palette only if that is
/// acceptable.
///
/// # Example
///
/// ```
/// use pixel_stylize::{smooth_edges, Rgb, RgbImage};
///
/// let flat = RgbImage::filled(4, 4, Rgb::new(10, 200, 30)).unwrap();
/// assert_eq!(smooth_edges(&flat, 1.0), flat);
/// ```
pub fn smooth_edges(image: &RgbImage, factor: f32) -> RgbImage {
    if factor.is_nan() || factor <= 0.0 {
        return image.clone();
    }
    let blurred = gaussian_blur(image, factor * SMOOTHING_SIGMA_PER_UNIT);
    let pixels = image
        .pixels()
        .par_iter()
        .zip(blurred.par_iter())
        .map(|(p, b)| lerp(p.to_f32(), *b, factor))
        .collect();
    image.with_pixels(pixels)
}

/// Steepen color edges with an unsharp mask.
///
/// Each pixel moves away from its blurred neighborhood by `strength`:
/// `p + strength * (p - blur(p))`, clamped to 0..=255. Flat regions are
/// untouched; pixels next to a boundary are pushed toward the extremes, so
/// soft superpixel borders read as hard steps.
pub fn harden_edges(image: &RgbImage, strength: f32) -> RgbImage {
    if strength.is_nan() || strength <= 0.0 {
        return image.clone();
    }
    let blurred = gaussian_blur(image, HARDEN_SIGMA);
    let pixels = image
        .pixels()
        .par_iter()
        .zip(blurred.par_iter())
        .map(|(p, b)| lerp(p.to_f32(), *b, -strength))
        .collect();
    image.with_pixels(pixels)
}

/// Luma edge strength: a 3x3 Laplacian (8 at the center, -1 around it) with
/// border samples repeated, clamped to 0..=255.
fn luma_edges(image: &RgbImage) -> Vec<u8> {
    let (w, h) = (image.width(), image.height());
    let luma: Vec<i32> = image.pixels().iter().map(|p| p.luma() as i32).collect();
    (0..w * h)
        .into_par_iter()
        .map(|i| {
            let (x, y) = (i % w, i / w);
            let xs = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let ys = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
            let mut sum = 8 * luma[i];
            for (j, &ny) in ys.iter().enumerate() {
                for (k, &nx) in xs.iter().enumerate() {
                    if (j, k) != (1, 1) {
                        sum -= luma[ny * w + nx];
                    }
                }
            }
            sum.clamp(0, 255) as u8
        })
        .collect()
}

/// Overlay inverted luma edges on the image.
///
/// Edges are found on the grayscale image, inverted so that edges are dark
/// and flat areas white, and blended over the image with `edge_weight`
/// (see [`CARTOON_EDGE_WEIGHT`]). Flat areas therefore lighten and
/// boundaries darken.
pub fn cartoon(image: &RgbImage, edge_weight: f32) -> RgbImage {
    let edges = luma_edges(image);
    let pixels = image
        .pixels()
        .par_iter()
        .zip(edges.par_iter())
        .map(|(p, &e)| {
            let v = (255 - e) as f32;
            lerp(p.to_f32(), [v; 3], edge_weight)
        })
        .collect();
    image.with_pixels(pixels)
}
