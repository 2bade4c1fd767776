//! Gamma lookup table access functions
//!
//! Decoding uses a 256-entry table generated at compile time by build.rs.
//! Encoding is only needed for the few colors produced by Lab quantization,
//! so it evaluates the formula directly.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Convert an 8-bit sRGB channel to linear light (0.0..=1.0).
#[inline]
pub fn srgb8_to_linear(value: u8) -> f64 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Convert a linear channel value to gamma-encoded sRGB (0.0..=1.0).
///
/// Out-of-range input is clamped first.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    let linear = linear.clamp(0.0, 1.0);
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}
