//! Error types for the pixel-stylize public API.
//!
//! [`StylizeError`] wraps every failure a render can produce into a single
//! enum for convenient `?` propagation in application code.

use thiserror::Error;

use super::style::Stage;

/// Malformed in-memory image buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCount { expected: usize, actual: usize },
    #[error("raw buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },
}

/// A configuration value outside its documented range.
///
/// Raised by [`Config::validate`](crate::Config::validate) before any stage
/// runs.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{option} = {value} is out of range (expected {expected})")]
pub struct ConfigError {
    /// Configuration key, as spelled in YAML
    pub option: &'static str,
    /// Offending value, formatted
    pub value: String,
    /// Human-readable accepted range
    pub expected: &'static str,
}

impl ConfigError {
    pub(crate) fn out_of_range(
        option: &'static str,
        value: impl ToString,
        expected: &'static str,
    ) -> Self {
        Self {
            option,
            value: value.to_string(),
            expected,
        }
    }
}

/// Unified error type for a stylization request.
///
/// # Example
///
/// ```
/// use pixel_stylize::{Config, Stylizer, StylizeError};
///
/// let config = Config {
///     color_count: 1,
///     ..Config::default()
/// };
/// let err = Stylizer::new(config).unwrap_err();
/// assert!(matches!(err, StylizeError::Config(_)));
/// ```
#[derive(Debug, Error)]
pub enum StylizeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("image error: {0}")]
    Image(#[from] ImageError),

    /// An internal invariant broke inside a stage. No partial output is
    /// returned.
    #[error("stage '{stage}' failed on {width}x{height} image: {cause}")]
    StageFailure {
        stage: Stage,
        width: usize,
        height: usize,
        cause: String,
    },
}
