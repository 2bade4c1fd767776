#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::manual_range_contains
)]

//! pixel-stylize: superpixel pixel-art rendering
//!
//! This library turns an arbitrary RGB image into a "pixel art" rendition:
//! flat superpixel regions, a reduced color set, optional dithering, and
//! optional outline and grid overlays.
//!
//! # Quick Start
//!
//! The [`Stylizer`] is the primary entry point. It validates a [`Config`]
//! once and then runs the stage list of the configured [`Style`]:
//!
//! ```
//! use pixel_stylize::{Config, Rgb, RgbImage, Style, Stylizer};
//!
//! let config = Config {
//!     pixel_size: 4,
//!     color_count: 8,
//!     style: Style::Dithered,
//!     ..Config::default()
//! };
//! let stylizer = Stylizer::new(config).unwrap();
//!
//! let image = RgbImage::filled(16, 16, Rgb::new(200, 80, 40)).unwrap();
//! let out = stylizer.stylize(&image).unwrap();
//! assert_eq!(out, image);
//! ```
//!
//! # Building Blocks
//!
//! Every stage is also available on its own:
//!
//! ```
//! use pixel_stylize::{
//!     align_to_grid, dither, segment, DitherMethod, DitherOptions, Quantizer, Rgb, RgbImage,
//!     SlicOptions,
//! };
//!
//! let pixels = (0..256u32)
//!     .map(|i| Rgb::new(i as u8, (i * 3 % 256) as u8, 255 - i as u8))
//!     .collect();
//! let image = RgbImage::from_pixels(16, 16, pixels).unwrap();
//!
//! let seg = segment(&image, &SlicOptions::new(4));
//! assert!(seg.labels.check(seg.centers.len()).is_ok());
//!
//! let blocks = align_to_grid(&image, 4);
//! let reduced = Quantizer::MedianCut.quantize(&blocks, 4);
//! assert!(reduced.distinct_colors() <= 4);
//!
//! let options = DitherOptions::new()
//!     .method(DitherMethod::Bayer)
//!     .strength(1.0);
//! let dithered = dither(&reduced, &options);
//! assert_eq!(dithered.width(), 16);
//! ```
//!
//! # Stages
//!
//! - [`segment`]: SLIC superpixels in CIE Lab, recolored with per-cluster
//!   mean RGB. [`align_to_grid`] is the exact block-average alternative.
//! - [`Quantizer`]: mini-batch k-means (RGB or Lab), median cut, or a fixed
//!   [`Palette`].
//! - [`dither`]: Floyd-Steinberg, Atkinson or 4x4 Bayer at a configurable
//!   bit depth, blended with the undithered input by `strength`.
//! - [`map_to_palette`]: nearest-color mapping onto a preset such as
//!   [`PaletteName::Gameboy`].
//! - [`draw_outline`] and [`draw_grid_lines`]: block-aligned overlays.
//! - [`adjust`]: brightness, contrast and saturation before segmentation.
//! - [`smooth_edges`], [`harden_edges`] and [`cartoon`]: optional
//!   post-processing filters.
//!
//! # Determinism
//!
//! Given the same image and configuration, every stage produces the same
//! output. Parallel work is split into fixed partitions whose partial
//! results are merged in a fixed order, so the thread count never changes
//! a result. The only randomness (k-means sampling, outline jitter) comes
//! from explicitly seeded generators.
//!
//! # Color Space
//!
//! Segmentation distances are measured in CIE Lab (D65 white point), which
//! tracks perceived color difference far better than raw RGB:
//!
//! ```
//! use pixel_stylize::{Lab, Rgb};
//!
//! let white = Lab::from(Rgb::WHITE);
//! assert!((white.l - 100.0).abs() < 1e-3);
//! assert!(white.a.abs() < 1e-3 && white.b.abs() < 1e-3);
//! ```

pub mod api;
pub mod color;
pub mod dither;
pub mod filter;
pub mod image;
pub mod outline;
pub mod palette;
pub mod preprocess;
pub mod quantize;
pub mod segment;


pub use api::{
    Config, ConfigError, GridConfig, ImageError, OutlineConfig, Stage, StageEvent, Style,
    StylizeError, Stylizer,
};
pub use color::{to_lab, Lab, LabImage, Rgb};
pub use dither::{blend, dither, DitherMethod, DitherOptions};
pub use filter::{cartoon, harden_edges, smooth_edges, CARTOON_EDGE_WEIGHT};
pub use image::RgbImage;
pub use outline::{draw_grid_lines, draw_outline, Jitter, OutlineOptions};
pub use palette::{map_to_palette, Palette, PaletteError, PaletteName, ParseColorError};
pub use preprocess::{adjust, AdjustOptions};
pub use quantize::{kmeans, median_cut, KMeansOptions, QuantizeMethod, QuantizeSpace, Quantizer};
pub use segment::{align_to_grid, segment, Center, LabelMap, Segmentation, SlicOptions};
