//! Test fixtures: synthetic images and on-disk inputs.

use pixel_stylize::{Rgb, RgbImage};
use pixelize::rendering::encode_png;
use std::path::{Path, PathBuf};

/// Smooth two-axis gradient, like a small photo.
pub fn gradient(width: usize, height: usize) -> RgbImage {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            Rgb::new(
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x + y) * 255 / (width + height)) as u8,
            )
        })
        .collect();
    RgbImage::from_pixels(width, height, pixels).unwrap()
}

/// Checkerboard of `block`-sized squares in two colors.
pub fn checkerboard(width: usize, height: usize, block: usize, a: Rgb, b: Rgb) -> RgbImage {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            if (x / block + y / block) % 2 == 0 {
                a
            } else {
                b
            }
        })
        .collect();
    RgbImage::from_pixels(width, height, pixels).unwrap()
}

/// Write `image` as a PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_png(image).unwrap()).unwrap();
    path
}

/// Write a YAML configuration file into `dir` and return its path.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
