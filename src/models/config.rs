use crate::error::RenderError;
use pixel_stylize::{
    Config, DitherMethod, PaletteName, QuantizeMethod, QuantizeSpace, Rgb, Style,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from a YAML file.
///
/// The document's keys are exactly those of [`Config`]; missing keys take
/// their defaults. Range checks happen later, when the stylizer is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfig {
    pub stylize: Config,
}

/// Command-line values that take precedence over the configuration file.
///
/// `None` (or `false` for switches) leaves the file's value in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub style: Option<Style>,
    pub pixel_size: Option<usize>,
    pub color_count: Option<usize>,
    pub palette: Option<PaletteName>,
    pub dithering: Option<DitherMethod>,
    pub dither_strength: Option<f32>,
    pub compactness: Option<f64>,
    pub slic_iters: Option<usize>,
    pub align_grid: bool,
    pub quantize_space: Option<QuantizeSpace>,
    pub quantize_method: Option<QuantizeMethod>,
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
    pub saturation: Option<f32>,
    pub edge_smoothing: Option<f32>,
    pub edge_harden: Option<f32>,
    pub cartoon: bool,
    pub resample_palette: bool,
    pub edge_outline: bool,
    pub edge_outline_thickness: Option<usize>,
    pub edge_outline_color: Option<Rgb>,
    pub outline_jitter_seed: Option<u64>,
    pub show_grid: bool,
}

impl AppConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, RenderError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)
            .map_err(|e| RenderError::Config(format!("{}: {e}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            style = %config.stylize.style,
            pixel_size = config.stylize.pixel_size,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: &Overrides) {
        let c = &mut self.stylize;
        if let Some(v) = overrides.style {
            c.style = v;
        }
        if let Some(v) = overrides.pixel_size {
            c.pixel_size = v;
        }
        if let Some(v) = overrides.color_count {
            c.color_count = v;
        }
        if let Some(v) = overrides.palette {
            c.palette_name = v;
        }
        if let Some(v) = overrides.dithering {
            c.dithering_method = v;
        }
        if let Some(v) = overrides.dither_strength {
            c.dithering_strength = v;
        }
        if let Some(v) = overrides.compactness {
            c.compactness = v;
        }
        if let Some(v) = overrides.slic_iters {
            c.max_iterations = v;
        }
        if overrides.align_grid {
            c.align_grid = true;
        }
        if let Some(v) = overrides.quantize_space {
            c.quantize_space = v;
        }
        if let Some(v) = overrides.quantize_method {
            c.quantize_method = v;
        }
        if let Some(v) = overrides.brightness {
            c.brightness = v;
        }
        if let Some(v) = overrides.contrast {
            c.contrast = v;
        }
        if let Some(v) = overrides.saturation {
            c.saturation = v;
        }
        if let Some(v) = overrides.edge_smoothing {
            c.edge_smoothing = v;
        }
        if let Some(v) = overrides.edge_harden {
            c.edge_harden = v;
        }
        if overrides.cartoon {
            c.cartoon = true;
        }
        if overrides.resample_palette {
            c.resample_palette = true;
        }
        if overrides.edge_outline {
            c.outline.enabled = true;
        }
        if let Some(v) = overrides.edge_outline_thickness {
            c.outline.thickness = v;
        }
        if let Some(v) = overrides.edge_outline_color {
            c.outline.color = v;
        }
        if let Some(v) = overrides.outline_jitter_seed {
            c.outline.jitter_seed = Some(v);
        }
        if overrides.show_grid {
            c.grid.enabled = true;
        }
    }

    pub fn into_config(self) -> Config {
        self.stylize
    }
}
