//! Color quantization
//!
//! Reduces an image to at most `color_count` colors with one of three
//! strategies:
//!
//! - [`kmeans`]: mini-batch k-means in RGB or Lab space (default)
//! - [`median_cut`]: recursive box splitting over the color histogram
//! - a fixed [`Palette`], by nearest-color mapping
//!
//! # Example
//!
//! ```
//! use pixel_stylize::{Quantizer, Rgb, RgbImage};
//!
//! let pixels = (0..64u8).map(|i| Rgb::new(i * 4, 0, 255 - i * 4)).collect();
//! let image = RgbImage::from_pixels(8, 8, pixels).unwrap();
//!
//! let out = Quantizer::MedianCut.quantize(&image, 4);
//! assert!(out.distinct_colors() <= 4);
//! ```

mod kmeans;
mod median_cut;

pub use kmeans::{kmeans, KMeansOptions};
pub use median_cut::median_cut;

use serde::{Deserialize, Serialize};

use crate::image::RgbImage;
use crate::palette::{map_to_palette, Palette};

/// Distance space for k-means clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuantizeSpace {
    /// Euclidean distance on 8-bit channels.
    #[default]
    #[serde(rename = "RGB", alias = "rgb")]
    Rgb,
    /// Euclidean distance in CIE Lab (perceptually closer to uniform).
    #[serde(rename = "LAB", alias = "lab")]
    Lab,
}

/// Strategy used to derive a palette from the image itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuantizeMethod {
    #[default]
    #[serde(rename = "kmeans", alias = "k_means")]
    KMeans,
    #[serde(rename = "median_cut", alias = "mediancut")]
    MedianCut,
}

/// A fully resolved quantization strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantizer {
    KMeans(KMeansOptions),
    MedianCut,
    /// Map onto a fixed palette; `color_count` is ignored.
    FixedPalette(Palette),
}

impl Quantizer {
    /// Quantize `image` to at most `color_count` colors.
    ///
    /// For [`Quantizer::FixedPalette`] the output instead contains only
    /// palette entries.
    pub fn quantize(&self, image: &RgbImage, color_count: usize) -> RgbImage {
        match self {
            Quantizer::KMeans(options) => kmeans(image, color_count, options),
            Quantizer::MedianCut => median_cut(image, color_count),
            Quantizer::FixedPalette(palette) => map_to_palette(image, palette),
        }
    }
}
