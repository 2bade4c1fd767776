//! Pixelize - superpixel pixel-art renderer
//!
//! Command-line host around the `pixel-stylize` core: PNG decoding and
//! encoding, YAML configuration, progress reporting and file/pipe I/O.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
