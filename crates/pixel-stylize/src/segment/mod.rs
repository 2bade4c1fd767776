//! Superpixel segmentation and block alignment
//!
//! Two ways to collapse an image into flat regions:
//!
//! - [`segment`]: SLIC superpixels. Clusters follow image content and each
//!   cluster is recolored with the mean of its pixels.
//! - [`align_to_grid`]: exact square blocks, each filled with its mean.

mod grid;
mod slic;

pub use grid::align_to_grid;
pub use slic::{segment, SlicOptions};

use thiserror::Error;

use crate::color::Lab;
use crate::image::RgbImage;

/// A superpixel cluster center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    /// Row (y) position, sub-pixel.
    pub row: f64,
    /// Column (x) position, sub-pixel.
    pub col: f64,
    /// Mean Lab color of the assigned pixels.
    pub color: Lab,
    /// Number of pixels assigned in the last iteration.
    pub count: usize,
}

/// A label map entry referenced a center that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("label {label} at pixel {index} out of range for {num_centers} centers")]
pub struct LabelOutOfRange {
    pub index: usize,
    pub label: u32,
    pub num_centers: usize,
}

/// Per-pixel cluster assignment, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: usize,
    height: usize,
    labels: Vec<u32>,
}

impl LabelMap {
    pub(crate) fn new(width: usize, height: usize, labels: Vec<u32>) -> Self {
        debug_assert_eq!(labels.len(), width * height);
        Self {
            width,
            height,
            labels,
        }
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
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.labels[y * self.width + x]
    }

    /// Verify every label indexes one of `num_centers` centers.
    pub fn check(&self, num_centers: usize) -> Result<(), LabelOutOfRange> {
        match self
            .labels
            .iter()
            .enumerate()
            .find(|(_, &l)| l as usize >= num_centers)
        {
            Some((index, &label)) => Err(LabelOutOfRange {
                index,
                label,
                num_centers,
            }),
            None => Ok(()),
        }
    }
}

/// The result of one segmentation run.
///
/// Returned by value; nothing about a run is retained by the segmenter, so
/// a caller that needs the labels for a later stage passes this along
/// explicitly.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Cluster index per pixel.
    pub labels: LabelMap,
    /// Final cluster centers, indexed by label.
    pub centers: Vec<Center>,
    /// Source image with every pixel replaced by its cluster's mean color.
    pub image: RgbImage,
}
