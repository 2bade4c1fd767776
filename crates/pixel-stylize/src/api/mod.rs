//! Public API for the pixel-stylize crate.
//!
//! This module provides the high-level API: [`Config`], the [`Style`]
//! presets and their [`Stage`] lists, the [`Stylizer`] orchestrator, and
//! the [`StylizeError`] unified error type.

mod config;
mod error;
mod style;
mod stylizer;

pub use config::{Config, GridConfig, OutlineConfig};
pub use error::{ConfigError, ImageError, StylizeError};
pub use style::{Stage, Style};
pub use stylizer::{StageEvent, Stylizer};
