//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing color strings.
///
/// Returned when a hex string (`#RRGGBB`, `#RGB`) or a decimal triple
/// (`R,G,B`) cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
    /// Decimal triple did not have exactly three components
    #[error("expected 3 comma-separated components, got {0}")]
    ComponentCount(usize),
    /// Decimal component was not an integer in 0..=255
    #[error("invalid color component '{0}' (expected 0-255)")]
    InvalidComponent(String),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// Duplicate color found at the specified index
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
    /// Invalid color string
    #[error("invalid palette color: {0}")]
    ParseColor(#[from] ParseColorError),
}
