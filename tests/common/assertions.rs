//! Assertion helpers for tests.

use pixel_stylize::{Palette, RgbImage};
use pixelize::rendering::decode_png;
use pretty_assertions::assert_eq;

/// PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Assert bytes are a decodable PNG and return the decoded image
pub fn assert_png(bytes: &[u8]) -> RgbImage {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    decode_png(bytes).expect("PNG should decode")
}

/// Assert image has the expected dimensions
pub fn assert_size(image: &RgbImage, width: usize, height: usize) {
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected image size"
    );
}

/// Assert every pixel is an entry of `palette`
pub fn assert_in_palette(image: &RgbImage, palette: &Palette) {
    if let Some((i, p)) = image
        .pixels()
        .iter()
        .enumerate()
        .find(|(_, p)| !palette.contains(**p))
    {
        panic!(
            "Pixel {} at ({}, {}) is not a palette color",
            p,
            i % image.width(),
            i / image.width()
        );
    }
}

/// Assert the image uses at most `max` distinct colors
pub fn assert_max_colors(image: &RgbImage, max: usize) {
    let n = image.distinct_colors();
    assert!(n <= max, "Expected at most {max} colors, found {n}");
}
