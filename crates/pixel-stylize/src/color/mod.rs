//! Color types and conversion utilities
//!
//! Two representations flow through the pipeline:
//!
//! - [`Rgb`]: 8-bit gamma-encoded sRGB. Every stage consumes and produces it.
//! - [`Lab`]: CIE L\*a\*b\* under the D65 white point. Used for superpixel
//!   distances and, optionally, for quantization distances.
//!
//! # Example
//!
//! ```
//! use pixel_stylize::{Lab, Rgb};
//!
//! let white = Lab::from(Rgb::new(255, 255, 255));
//! assert!((white.l - 100.0).abs() < 1e-3);
//!
//! let back = white.to_rgb();
//! assert_eq!(back, Rgb::new(255, 255, 255));
//! ```

mod lab;
mod lut;
mod rgb;

pub use lab::{to_lab, Lab, LabImage};
pub use rgb::Rgb;
