//! Tone adjustments applied before stylization.
//!
//! Three classic enhancement operations, each expressed as a blend between
//! the image and a "degenerate" version of it:
//!
//! | Operation  | Degenerate image                     |
//! |------------|--------------------------------------|
//! | brightness | solid black                          |
//! | contrast   | solid gray at the image's mean luma  |
//! | saturation | the per-pixel luma (grayscale copy)  |
//!
//! A factor of `1.0` is the identity, `0.0` yields the degenerate image, and
//! factors above `1.0` extrapolate away from it. Operations run in the order
//! brightness, contrast, saturation, rounding to 8 bits after each.
//!
//! # Example
//!
//! ```
//! use pixel_stylize::{adjust, AdjustOptions, Rgb, RgbImage};
//!
//! let image = RgbImage::filled(2, 2, Rgb::new(100, 50, 200)).unwrap();
//! let out = adjust(&image, &AdjustOptions::new().brightness(0.5));
//! assert_eq!(out.get(0, 0), Rgb::new(50, 25, 100));
//! ```

mod adjust;
mod options;

pub use adjust::adjust;
pub use options::AdjustOptions;
