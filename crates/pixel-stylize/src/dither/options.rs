//! Dithering method and options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dithering algorithm.
///
/// Names are matched case-insensitively with `-` and `_` treated alike.
/// Unknown names fall back to [`DitherMethod::FloydSteinberg`] with a
/// warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DitherMethod {
    /// No dithering; the input passes through unchanged.
    #[default]
    None,

    /// Floyd-Steinberg error diffusion (100% propagation).
    FloydSteinberg,

    /// Atkinson error diffusion (75% propagation).
    ///
    /// Loses a quarter of the error on purpose, giving crisper, higher
    /// contrast output with less noise in flat regions.
    Atkinson,

    /// 4x4 Bayer ordered dithering.
    ///
    /// Position-dependent thresholds, no error propagation. Pixels are
    /// independent, so this is the only method that parallelizes per pixel.
    Bayer,
}

impl DitherMethod {
    pub const ALL: &'static [DitherMethod] = &[
        DitherMethod::None,
        DitherMethod::FloydSteinberg,
        DitherMethod::Atkinson,
        DitherMethod::Bayer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DitherMethod::None => "none",
            DitherMethod::FloydSteinberg => "floyd_steinberg",
            DitherMethod::Atkinson => "atkinson",
            DitherMethod::Bayer => "bayer",
        }
    }

    /// Strict lookup. Returns `None` for unknown names.
    pub fn lookup(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "" | "none" => Some(DitherMethod::None),
            "floyd_steinberg" | "floydsteinberg" | "fs" => Some(DitherMethod::FloydSteinberg),
            "atkinson" => Some(DitherMethod::Atkinson),
            "bayer" | "ordered" => Some(DitherMethod::Bayer),
            _ => None,
        }
    }

    /// Lenient lookup: unknown names fall back to Floyd-Steinberg.
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(
                method = name,
                "unknown dithering method, using floyd_steinberg"
            );
            DitherMethod::FloydSteinberg
        })
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DitherMethod {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<DitherMethod> for String {
    fn from(method: DitherMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Configuration options for dithering.
///
/// # Defaults
///
/// - Method: [`DitherMethod::None`]
/// - Strength: `0.5`
/// - Bit depth: `1` (two levels per channel)
///
/// # Example
///
/// ```
/// use pixel_stylize::{DitherMethod, DitherOptions};
///
/// let options = DitherOptions::new()
///     .method(DitherMethod::Atkinson)
///     .strength(1.0)
///     .bit_depth(2);
/// assert_eq!(options.levels(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Which algorithm to run.
    pub method: DitherMethod,

    /// Blend factor between the undithered input (`0.0`) and the fully
    /// dithered result (`1.0`).
    ///
    /// Default: `0.5`
    pub strength: f32,

    /// Bits per channel of the dithered output, 1..=8.
    ///
    /// Default: `1`
    pub bit_depth: u8,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            method: DitherMethod::None,
            strength: 0.5,
            bit_depth: 1,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn method(mut self, method: DitherMethod) -> Self {
        self.method = method;
        self
    }

    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    #[inline]
    pub fn bit_depth(mut self, bits: u8) -> Self {
        self.bit_depth = bits;
        self
    }

    /// Output levels per channel, `2^bit_depth`.
    #[inline]
    pub fn levels(&self) -> u32 {
        1u32 << self.bit_depth.clamp(1, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = DitherOptions::default();
        assert_eq!(opts.method, DitherMethod::None);
        assert_eq!(opts.strength, 0.5);
        assert_eq!(opts.bit_depth, 1);
        assert_eq!(opts.levels(), 2);
    }

    #[test]
    fn test_builder_chaining() {
        let opts = DitherOptions::new()
            .method(DitherMethod::Bayer)
            .strength(0.25)
            .bit_depth(3);
        assert_eq!(opts.method, DitherMethod::Bayer);
        assert_eq!(opts.strength, 0.25);
        assert_eq!(opts.levels(), 8);
    }

    #[test]
    fn test_levels_clamped() {
        assert_eq!(DitherOptions::new().bit_depth(0).levels(), 2);
        assert_eq!(DitherOptions::new().bit_depth(12).levels(), 256);
    }

    #[test]
    fn test_method_names() {
        for method in DitherMethod::ALL {
            assert_eq!(DitherMethod::lookup(method.as_str()), Some(*method));
        }
        assert_eq!(
            DitherMethod::lookup("Floyd-Steinberg"),
            Some(DitherMethod::FloydSteinberg)
        );
    }

    #[test]
    fn test_unknown_method_falls_back_to_floyd_steinberg() {
        assert_eq!(
            DitherMethod::from_name("jarvis"),
            DitherMethod::FloydSteinberg
        );
        let method: DitherMethod = serde_yaml::from_str("sierra").unwrap();
        assert_eq!(method, DitherMethod::FloydSteinberg);
    }
}
