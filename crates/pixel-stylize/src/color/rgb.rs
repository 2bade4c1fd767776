//! 8-bit sRGB color type
//!
//! [`Rgb`] is the pixel type of every image the pipeline reads or writes.
//! Channels are gamma-encoded bytes exactly as they appear in image files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// A gamma-encoded 8-bit sRGB color.
///
/// Ordering and hashing are by `(r, g, b)`, which makes the type usable as
/// a histogram key.
///
/// # Example
/// ```
/// use pixel_stylize::Rgb;
///
/// let red: Rgb = "#F00".parse().unwrap();
/// assert_eq!(red, Rgb::new(255, 0, 0));
///
/// let gray: Rgb = "30, 30, 30".parse().unwrap();
/// assert_eq!(gray, Rgb::new(30, 30, 30));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a color from floating-point channels, rounding and clamping
    /// each to 0..=255.
    #[inline]
    pub fn from_f32_clamped(channels: [f32; 3]) -> Self {
        let q = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Self::new(q(channels[0]), q(channels[1]), q(channels[2]))
    }

    /// Channels as `f32`, for arithmetic that needs headroom.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Squared Euclidean distance in RGB byte space.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// ITU-R 601-2 luma, as used for grayscale conversion:
    /// `L = R * 299/1000 + G * 587/1000 + B * 114/1000`.
    #[inline]
    pub fn luma(self) -> u8 {
        ((self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114 + 500) / 1000) as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string or a comma-separated triple.
    ///
    /// Supported formats:
    /// - `#RRGGBB` / `RRGGBB`
    /// - `#RGB` / `RGB` (each digit expanded, `F` -> `FF`)
    /// - `R,G,B` with decimal components, whitespace allowed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains(',') {
            let parts: Vec<&str> = s.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(ParseColorError::ComponentCount(parts.len()));
            }
            let parse = |p: &str| {
                p.parse::<u8>()
                    .map_err(|_| ParseColorError::InvalidComponent(p.to_string()))
            };
            return Ok(Self::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?));
        }

        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}
