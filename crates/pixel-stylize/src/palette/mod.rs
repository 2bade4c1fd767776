//! Palettes, named presets, and nearest-color mapping
//!
//! A [`Palette`] is an ordered, duplicate-free list of colors. Order matters:
//! when two entries are equally close to a pixel, the earlier one wins.
//!
//! # Example
//!
//! ```
//! use pixel_stylize::{map_to_palette, Palette, PaletteName, Rgb, RgbImage};
//!
//! let palette = PaletteName::Gameboy.palette().unwrap();
//! let image = RgbImage::filled(4, 4, Rgb::new(200, 220, 40)).unwrap();
//! let mapped = map_to_palette(&image, palette);
//!
//! assert!(mapped.pixels().iter().all(|p| palette.contains(*p)));
//! ```

mod error;
mod palette;
mod presets;

pub use error::{PaletteError, ParseColorError};
pub use palette::{map_to_palette, Palette};
pub(crate) use presets::gameboy;
pub use presets::PaletteName;
