//! Palette struct and nearest-color mapping.

use std::collections::HashSet;

use rayon::prelude::*;

use super::error::PaletteError;
use crate::color::Rgb;
use crate::image::RgbImage;

/// An ordered, non-empty, duplicate-free list of colors.
///
/// Matching uses squared Euclidean distance in RGB byte space. The scan is
/// linear with a strict `<` comparison, so ties resolve to the lowest index.
///
/// # Example
///
/// ```
/// use pixel_stylize::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(palette.nearest(Rgb::new(100, 100, 100)), Rgb::BLACK);
/// assert_eq!(palette.nearest(Rgb::new(200, 200, 200)), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from colors in priority order.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::DuplicateColor`] if a color repeats
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let mut seen = HashSet::new();
        for (i, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from color strings (`#RRGGBB`, `#RGB` or `R,G,B`).
    pub fn from_strs(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| s.parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// Evenly spaced gray ramp from black to white.
    ///
    /// `levels` is clamped to 2..=256.
    ///
    /// ```
    /// use pixel_stylize::{Palette, Rgb};
    ///
    /// let ramp = Palette::gray_ramp(3);
    /// assert_eq!(ramp.colors(), &[Rgb::BLACK, Rgb::new(128, 128, 128), Rgb::WHITE]);
    /// ```
    pub fn gray_ramp(levels: usize) -> Self {
        let levels = levels.clamp(2, 256);
        let colors = (0..levels)
            .map(|i| {
                let v = ((i * 255) as f64 / (levels - 1) as f64).round() as u8;
                Rgb::new(v, v, v)
            })
            .collect();
        Self { colors }
    }

    /// Build from a table already known to be valid.
    pub(crate) fn from_trusted(colors: &[Rgb]) -> Self {
        debug_assert!(!colors.is_empty());
        Self {
            colors: colors.to_vec(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; palettes cannot be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Fit the palette to `count` entries.
    ///
    /// A longer palette keeps the entries at evenly spaced indices
    /// `i * len / count`. A shorter one is stretched by linear interpolation
    /// between neighboring entries, truncating each channel. Repeated
    /// colors are dropped afterwards, so the result may hold fewer than
    /// `count` entries.
    ///
    /// ```
    /// use pixel_stylize::{Palette, Rgb};
    ///
    /// let bw = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
    /// let three = bw.resample(3);
    /// assert_eq!(three.colors()[1], Rgb::new(127, 127, 127));
    /// ```
    pub fn resample(&self, count: usize) -> Palette {
        let count = count.max(1);
        let n = self.colors.len();
        let resized: Vec<Rgb> = if n > count {
            (0..count).map(|i| self.colors[i * n / count]).collect()
        } else if n < count {
            (0..count)
                .map(|i| {
                    let position = (i * (n - 1)) as f64 / (count - 1) as f64;
                    let index = position as usize;
                    if index + 1 >= n {
                        return self.colors[n - 1];
                    }
                    let t = position - index as f64;
                    let (from, to) = (self.colors[index], self.colors[index + 1]);
                    let lerp = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)) as u8;
                    Rgb::new(lerp(from.r, to.r), lerp(from.g, to.g), lerp(from.b, to.b))
                })
                .collect()
        } else {
            return self.clone();
        };

        let mut seen = HashSet::new();
        let colors = resized.into_iter().filter(|c| seen.insert(*c)).collect();
        Self { colors }
    }

    /// Index of the closest entry. Ties go to the lowest index.
    pub fn find_nearest(&self, color: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;
        for (i, entry) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(*entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }
        best_idx
    }

    /// The closest entry itself.
    #[inline]
    pub fn nearest(&self, color: Rgb) -> Rgb {
        self.colors[self.find_nearest(color)]
    }
}

/// Replace every pixel with its nearest palette entry.
///
/// Pixels are independent, so the image is processed in parallel.
pub fn map_to_palette(image: &RgbImage, palette: &Palette) -> RgbImage {
    let pixels = image
        .pixels()
        .par_iter()
        .map(|&p| palette.nearest(p))
        .collect();
    image.with_pixels(pixels)
}
