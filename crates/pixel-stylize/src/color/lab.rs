//! CIE L\*a\*b\* color type and image conversion
//!
//! Conversion goes sRGB -> linear RGB (gamma LUT) -> XYZ (sRGB primaries)
//! -> Lab relative to the D65 reference white.

use rayon::prelude::*;

use super::lut::{linear_to_srgb, srgb8_to_linear};
use super::rgb::Rgb;
use crate::image::RgbImage;

/// D65 reference white in XYZ.
const WHITE_D65: [f64; 3] = [0.95047, 1.0, 1.08883];

/// Linear sRGB to XYZ.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ to linear sRGB.
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

const EPSILON: f64 = 0.008856;
const KAPPA_SLOPE: f64 = 7.787;
const OFFSET: f64 = 16.0 / 116.0;

#[inline]
fn f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_SLOPE * t + OFFSET
    }
}

#[inline]
fn f_inv(t: f64) -> f64 {
    let cubed = t * t * t;
    if cubed > EPSILON {
        cubed
    } else {
        (t - OFFSET) / KAPPA_SLOPE
    }
}

#[inline]
fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// A color in CIE L\*a\*b\* space (D65).
///
/// `l` ranges over 0..=100; `a` and `b` are roughly -128..=128 for colors
/// reachable from sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green (negative) to red (positive)
    pub a: f64,
    /// Blue (negative) to yellow (positive)
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Squared Euclidean distance (Delta E 1976, squared).
    #[inline]
    pub fn distance_squared(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// Sum of absolute component differences.
    #[inline]
    pub fn manhattan(self, other: Lab) -> f64 {
        (self.l - other.l).abs() + (self.a - other.a).abs() + (self.b - other.b).abs()
    }

    /// Convert back to 8-bit sRGB.
    ///
    /// Colors outside the sRGB gamut are clamped per channel.
    pub fn to_rgb(self) -> Rgb {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;
        let xyz = [
            f_inv(fx) * WHITE_D65[0],
            f_inv(fy) * WHITE_D65[1],
            f_inv(fz) * WHITE_D65[2],
        ];
        let linear = mul(&XYZ_TO_RGB, xyz);
        let encode = |c: f64| (linear_to_srgb(c) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(encode(linear[0]), encode(linear[1]), encode(linear[2]))
    }
}

impl From<Rgb> for Lab {
    fn from(color: Rgb) -> Self {
        let linear = [
            srgb8_to_linear(color.r),
            srgb8_to_linear(color.g),
            srgb8_to_linear(color.b),
        ];
        let xyz = mul(&RGB_TO_XYZ, linear);
        let fx = f(xyz[0] / WHITE_D65[0]);
        let fy = f(xyz[1] / WHITE_D65[1]);
        let fz = f(xyz[2] / WHITE_D65[2]);
        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

/// A row-major Lab image with the same dimensions as its source.
#[derive(Debug, Clone)]
pub struct LabImage {
    width: usize,
    height: usize,
    pixels: Vec<Lab>,
}

impl LabImage {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Lab] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Lab {
        self.pixels[y * self.width + x]
    }

    #[cfg(test)]
    pub(crate) fn from_pixels(width: usize, height: usize, pixels: Vec<Lab>) -> Self {
        assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Convert an RGB image to Lab, one pixel at a time in parallel.
pub fn to_lab(image: &RgbImage) -> LabImage {
    let pixels = image.pixels().par_iter().map(|&p| Lab::from(p)).collect();
    LabImage {
        width: image.width(),
        height: image.height(),
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::palette::{FromColor, Srgb};

    #[test]
    fn test_white_and_black() {
        let white = Lab::from(Rgb::WHITE);
        assert!((white.l - 100.0).abs() < 1e-3, "L of white: {}", white.l);
        assert!(white.a.abs() < 1e-2, "a of white: {}", white.a);
        assert!(white.b.abs() < 1e-2, "b of white: {}", white.b);

        let black = Lab::from(Rgb::BLACK);
        assert!(black.l.abs() < 1e-9);
        assert!(black.a.abs() < 1e-9);
        assert!(black.b.abs() < 1e-9);
    }

    #[test]
    fn test_agrees_with_palette_crate() {
        let samples = [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(128, 64, 32),
            Rgb::new(12, 200, 180),
            Rgb::new(3, 3, 3),
        ];
        for c in samples {
            let ours = Lab::from(c);
            let srgb = Srgb::new(c.r, c.g, c.b).into_format::<f64>();
            let theirs = ::palette::Lab::<::palette::white_point::D65, f64>::from_color(srgb);
            assert!(
                (ours.l - theirs.l).abs() < 0.1
                    && (ours.a - theirs.a).abs() < 0.2
                    && (ours.b - theirs.b).abs() < 0.2,
                "{c}: ours {ours:?}, palette {theirs:?}"
            );
        }
    }

    #[test]
    fn test_round_trip_to_rgb() {
        for c in [
            Rgb::new(255, 0, 0),
            Rgb::new(10, 20, 30),
            Rgb::new(200, 150, 100),
            Rgb::WHITE,
            Rgb::BLACK,
        ] {
            assert_eq!(Lab::from(c).to_rgb(), c);
        }
    }

    #[test]
    fn test_out_of_gamut_clamps() {
        let c = Lab::new(50.0, 200.0, -200.0).to_rgb();
        // Only checks that conversion does not wrap
        assert!(c.r > 100);
        assert!(c.b > 100);
    }

    #[test]
    fn test_to_lab_preserves_shape() {
        let image = RgbImage::from_pixels(3, 2, vec![Rgb::new(10, 20, 30); 6]).unwrap();
        let lab = to_lab(&image);
        assert_eq!(lab.width(), 3);
        assert_eq!(lab.height(), 2);
        assert_eq!(lab.pixels().len(), 6);
        assert_eq!(lab.get(2, 1), Lab::from(Rgb::new(10, 20, 30)));
    }
}
