//! In-memory RGB image buffer.
//!
//! Every pipeline stage takes an [`RgbImage`] by reference and returns a new
//! one; buffers are never shared mutably between stages.

use std::collections::HashSet;

use crate::api::ImageError;
use crate::color::Rgb;

/// A row-major 8-bit RGB image.
///
/// # Example
/// ```
/// use pixel_stylize::{Rgb, RgbImage};
///
/// let raw = [255u8, 0, 0, 0, 0, 255];
/// let image = RgbImage::from_raw(2, 1, &raw).unwrap();
/// assert_eq!(image.get(1, 0), Rgb::new(0, 0, 255));
/// assert_eq!(image.to_raw(), raw);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Create an image filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, ImageError> {
        Self::from_pixels(width, height, vec![color; width * height])
    }

    /// Wrap a row-major pixel vector.
    ///
    /// # Errors
    ///
    /// [`ImageError::ZeroDimension`] if either dimension is zero, or
    /// [`ImageError::PixelCount`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroDimension { width, height });
        }
        if pixels.len() != width * height {
            return Err(ImageError::PixelCount {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image from interleaved `RGBRGB...` bytes.
    pub fn from_raw(width: usize, height: usize, raw: &[u8]) -> Result<Self, ImageError> {
        if raw.len() != width * height * 3 {
            return Err(ImageError::BufferLength {
                expected: width * height * 3,
                actual: raw.len(),
            });
        }
        let pixels = raw
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Interleaved `RGBRGB...` bytes.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    /// If the coordinates are outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Number of distinct colors in the image.
    pub fn distinct_colors(&self) -> usize {
        self.pixels.iter().collect::<HashSet<_>>().len()
    }

    /// A new image with this image's dimensions and the given pixels.
    pub(crate) fn with_pixels(&self, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), self.pixels.len());
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
