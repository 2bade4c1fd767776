//! Dithering algorithms.
//!
//! Dithering reintroduces the illusion of intermediate tones after
//! quantization by trading color accuracy for spatial noise. Every method
//! reduces each channel to `2^bit_depth` evenly spaced levels; the result is
//! then blended with the input by `strength`.
//!
//! - **Floyd-Steinberg** and **Atkinson**: error diffusion in raster order.
//!   Each channel is an independent sequential pass, so the three channels
//!   run in parallel.
//! - **Bayer**: 4x4 ordered thresholds, fully per-pixel.
//!
//! # Example
//!
//! ```
//! use pixel_stylize::{dither, DitherMethod, DitherOptions, Rgb, RgbImage};
//!
//! let image = RgbImage::filled(4, 4, Rgb::new(128, 128, 128)).unwrap();
//! let options = DitherOptions::new()
//!     .method(DitherMethod::FloydSteinberg)
//!     .strength(1.0);
//!
//! let out = dither(&image, &options);
//! assert!(out
//!     .pixels()
//!     .iter()
//!     .all(|&p| p == Rgb::BLACK || p == Rgb::WHITE));
//! ```

mod kernel;
mod options;
mod ordered;

pub use kernel::{Kernel, ATKINSON, FLOYD_STEINBERG};
pub use options::{DitherMethod, DitherOptions};

use rayon::prelude::*;

use crate::color::Rgb;
use crate::image::RgbImage;

/// Snap a channel value to the nearest of `levels` evenly spaced levels
/// over 0..=255.
#[inline]
pub(crate) fn quantize_level(value: f32, levels: u32) -> f32 {
    let step = 255.0 / (levels - 1) as f32;
    (value / step).round().clamp(0.0, (levels - 1) as f32) * step
}

/// Error buffer for one channel of error diffusion.
///
/// Manages a sliding window of error rows, storing only the rows that the
/// diffusion kernel can reach (determined by `max_dy`).
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// Error rows: rows[0] is current row, rows[1] is next, etc.
    rows: Vec<Vec<f32>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a new error buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - Image width in pixels
    /// * `row_depth` - Number of rows to track (kernel's `max_dy + 1`)
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![0.0; width]).collect(),
            width,
        }
    }

    /// Error accumulated so far for pixel `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> f32 {
        self.rows[0][x]
    }

    /// Add error to a future pixel.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: f32) {
        if x < self.width && row_offset < self.rows.len() {
            self.rows[row_offset][x] += error;
        }
    }

    /// Advance to the next row.
    ///
    /// Rotates the row buffer: the first row is discarded, subsequent rows
    /// shift forward, and a new zeroed row is added at the end.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill(0.0);
        }
    }
}

/// Error-diffuse one channel plane in raster order.
fn diffuse_channel(
    plane: &[f32],
    width: usize,
    height: usize,
    kernel: &Kernel,
    levels: u32,
) -> Vec<f32> {
    let mut output = vec![0.0; plane.len()];
    let mut errors = ErrorBuffer::new(width, kernel.max_dy + 1);
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = plane[idx] + errors.get_accumulated(x);
            let new = quantize_level(old, levels);
            output[idx] = new;

            let error = old - new;
            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                let ny = y + dy as usize;
                if nx < 0 || nx >= width as i32 || ny >= height {
                    continue;
                }
                errors.add_error(nx as usize, dy as usize, error * weight as f32 / divisor);
            }
        }
        errors.advance_row();
    }
    output
}

/// Error diffusion over all three channels, one channel per task.
pub(crate) fn error_diffusion(image: &RgbImage, kernel: &Kernel, levels: u32) -> RgbImage {
    let (width, height) = (image.width(), image.height());

    let planes: Vec<Vec<f32>> = (0..3usize)
        .into_par_iter()
        .map(|c| {
            let plane: Vec<f32> = image.pixels().iter().map(|p| p.to_f32()[c]).collect();
            diffuse_channel(&plane, width, height, kernel, levels)
        })
        .collect();

    let pixels = (0..width * height)
        .map(|i| Rgb::from_f32_clamped([planes[0][i], planes[1][i], planes[2][i]]))
        .collect();
    image.with_pixels(pixels)
}

/// Linear blend `(1 - strength) * quantized + strength * dithered`, rounded.
///
/// `strength <= 0` returns `quantized` unchanged.
pub fn blend(quantized: &RgbImage, dithered: &RgbImage, strength: f32) -> RgbImage {
    if strength <= 0.0 {
        return quantized.clone();
    }
    let s = strength.min(1.0);
    let pixels = quantized
        .pixels()
        .par_iter()
        .zip(dithered.pixels().par_iter())
        .map(|(q, d)| {
            let (q, d) = (q.to_f32(), d.to_f32());
            Rgb::from_f32_clamped([
                (1.0 - s) * q[0] + s * d[0],
                (1.0 - s) * q[1] + s * d[1],
                (1.0 - s) * q[2] + s * d[2],
            ])
        })
        .collect();
    quantized.with_pixels(pixels)
}

/// Dither `image` and blend the result with the input.
///
/// Returns the input unchanged for [`DitherMethod::None`] or a strength of
/// zero.
pub fn dither(image: &RgbImage, options: &DitherOptions) -> RgbImage {
    if options.strength <= 0.0 {
        return image.clone();
    }
    let levels = options.levels();
    let dithered = match options.method {
        DitherMethod::None => return image.clone(),
        DitherMethod::FloydSteinberg => error_diffusion(image, &FLOYD_STEINBERG, levels),
        DitherMethod::Atkinson => error_diffusion(image, &ATKINSON, levels),
        DitherMethod::Bayer => ordered::bayer(image, levels),
    };
    blend(image, &dithered, options.strength)
}
