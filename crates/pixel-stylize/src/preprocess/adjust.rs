//! Brightness, contrast and saturation.

use rayon::prelude::*;

use super::options::AdjustOptions;
use crate::color::Rgb;
use crate::image::RgbImage;

/// Blend each pixel away from its degenerate counterpart by `factor`.
fn blend_with<F>(image: &RgbImage, factor: f32, degenerate: F) -> RgbImage
where
    F: Fn(Rgb) -> [f32; 3] + Sync,
{
    let pixels = image
        .pixels()
        .par_iter()
        .map(|&p| {
            let d = degenerate(p);
            let c = p.to_f32();
            Rgb::from_f32_clamped([
                d[0] + factor * (c[0] - d[0]),
                d[1] + factor * (c[1] - d[1]),
                d[2] + factor * (c[2] - d[2]),
            ])
        })
        .collect();
    image.with_pixels(pixels)
}

fn mean_luma(image: &RgbImage) -> f32 {
    let total: u64 = image.pixels().par_iter().map(|p| p.luma() as u64).sum();
    let n = image.pixels().len() as u64;
    ((total + n / 2) / n) as f32
}

/// Apply brightness, then contrast, then saturation.
///
/// Factors equal to `1.0` are skipped entirely, so the identity options
/// return an exact copy.
pub fn adjust(image: &RgbImage, options: &AdjustOptions) -> RgbImage {
    let mut out = image.clone();

    if options.brightness != 1.0 {
        out = blend_with(&out, options.brightness, |_| [0.0; 3]);
    }

    if options.contrast != 1.0 {
        let mean = mean_luma(&out);
        out = blend_with(&out, options.contrast, |_| [mean; 3]);
    }

    if options.saturation != 1.0 {
        out = blend_with(&out, options.saturation, |p| {
            let l = p.luma() as f32;
            [l; 3]
        });
    }

    out
}
