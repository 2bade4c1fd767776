//! Stylization parameters.
//!
//! [`Config`] mirrors the YAML keys of the host's configuration file one to
//! one. Every field has a default, so a partial document deserializes
//! cleanly. Ranges are checked by [`Config::validate`], which
//! [`Stylizer::new`](crate::Stylizer::new) calls before anything runs.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::style::Style;
use crate::color::Rgb;
use crate::dither::{DitherMethod, DitherOptions};
use crate::outline::{Jitter, OutlineOptions};
use crate::palette::{self, Palette, PaletteName};
use crate::preprocess::AdjustOptions;
use crate::quantize::{KMeansOptions, QuantizeMethod, QuantizeSpace, Quantizer};
use crate::segment::SlicOptions;

/// Most gray levels the monochrome style will use.
const MAX_MONOCHROME_LEVELS: usize = 16;

/// Largest accepted superpixel step / block size.
pub const MAX_PIXEL_SIZE: usize = 4096;

/// Ring outline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub enabled: bool,
    /// Dilation radius, 1..=32.
    pub thickness: usize,
    pub color: Rgb,
    /// Seed for per-cell jitter. Absent means no jitter.
    pub jitter_seed: Option<u64>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            thickness: 3,
            color: Rgb::new(30, 30, 30),
            jitter_seed: None,
        }
    }
}

/// Block grid-line settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    pub color: Rgb,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Rgb::WHITE,
        }
    }
}

/// Complete parameter set for one stylization.
///
/// # Example
///
/// ```
/// use pixel_stylize::{Config, DitherMethod, Style};
///
/// let config = Config {
///     style: Style::Dithered,
///     dithering_method: DitherMethod::Atkinson,
///     color_count: 8,
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Superpixel step and grid block size in pixels, 1..=4096.
    ///
    /// Default: `16`
    pub pixel_size: usize,

    /// Target color count for derived palettes, 2..=256.
    ///
    /// Default: `32`
    pub color_count: usize,

    /// SLIC spatial weight. Must be finite and positive.
    ///
    /// Default: `10.0`
    pub compactness: f64,

    /// SLIC iteration cap, 1..=100.
    ///
    /// Default: `10`
    pub max_iterations: usize,

    pub dithering_method: DitherMethod,

    /// Blend factor, 0..=1.
    ///
    /// Default: `0.5`
    pub dithering_strength: f32,

    /// Dither bits per channel, 1..=8.
    ///
    /// Default: `1`
    pub bit_depth: u8,

    /// Replace SLIC with plain block averaging.
    pub align_grid: bool,

    pub quantize_space: QuantizeSpace,
    pub quantize_method: QuantizeMethod,

    /// Fixed palette. When set, quantization maps onto it instead of
    /// deriving colors, and the retro style uses it instead of Game Boy.
    pub palette_name: PaletteName,

    /// Fit fixed palettes to `color_count` entries before mapping
    /// (see [`Palette::resample`]).
    pub resample_palette: bool,

    pub style: Style,

    /// Default: `42`
    pub kmeans_seed: u64,
    /// Default: `4096`
    pub kmeans_batch_size: usize,
    /// Default: `100`
    pub kmeans_iterations: usize,

    /// 0.1..=2.0
    pub brightness: f32,
    /// 0.1..=3.0
    pub contrast: f32,
    /// 0.0..=2.0
    pub saturation: f32,

    /// Gaussian-blur blend after the style stages, 0..=1. `0` disables it.
    pub edge_smoothing: f32,

    /// Unsharp-mask strength after the style stages, 0..=1. `0` disables it.
    pub edge_harden: f32,

    /// Overlay inverted luma edges after the style stages.
    pub cartoon: bool,

    pub outline: OutlineConfig,
    pub grid: GridConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pixel_size: 16,
            color_count: 32,
            compactness: 10.0,
            max_iterations: 10,
            dithering_method: DitherMethod::None,
            dithering_strength: 0.5,
            bit_depth: 1,
            align_grid: false,
            quantize_space: QuantizeSpace::Rgb,
            quantize_method: QuantizeMethod::KMeans,
            palette_name: PaletteName::None,
            resample_palette: false,
            style: Style::Basic,
            kmeans_seed: 42,
            kmeans_batch_size: 4096,
            kmeans_iterations: 100,
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            edge_smoothing: 0.0,
            edge_harden: 0.0,
            cartoon: false,
            outline: OutlineConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

fn check_usize(
    option: &'static str,
    value: usize,
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(option, value, expected))
    }
}

fn check_f32(
    option: &'static str,
    value: f32,
    min: f32,
    max: f32,
    expected: &'static str,
) -> Result<(), ConfigError> {
    // NaN fails `contains`.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(option, value, expected))
    }
}

impl Config {
    /// Check every numeric option against its documented range.
    ///
    /// Returns the first offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_usize(
            "pixel_size",
            self.pixel_size,
            1,
            MAX_PIXEL_SIZE,
            "1..=4096",
        )?;
        check_usize("color_count", self.color_count, 2, 256, "2..=256")?;
        if !(self.compactness.is_finite() && self.compactness > 0.0) {
            return Err(ConfigError::out_of_range(
                "compactness",
                self.compactness,
                "finite and > 0",
            ));
        }
        check_usize("max_iterations", self.max_iterations, 1, 100, "1..=100")?;
        check_f32(
            "dithering_strength",
            self.dithering_strength,
            0.0,
            1.0,
            "0.0..=1.0",
        )?;
        check_usize("bit_depth", self.bit_depth as usize, 1, 8, "1..=8")?;
        check_usize(
            "kmeans_batch_size",
            self.kmeans_batch_size,
            1,
            usize::MAX,
            ">= 1",
        )?;
        check_usize(
            "kmeans_iterations",
            self.kmeans_iterations,
            1,
            usize::MAX,
            ">= 1",
        )?;
        check_f32("brightness", self.brightness, 0.1, 2.0, "0.1..=2.0")?;
        check_f32("contrast", self.contrast, 0.1, 3.0, "0.1..=3.0")?;
        check_f32("saturation", self.saturation, 0.0, 2.0, "0.0..=2.0")?;
        check_f32(
            "edge_smoothing",
            self.edge_smoothing,
            0.0,
            1.0,
            "0.0..=1.0",
        )?;
        check_f32("edge_harden", self.edge_harden, 0.0, 1.0, "0.0..=1.0")?;
        check_usize(
            "outline.thickness",
            self.outline.thickness,
            1,
            32,
            "1..=32",
        )?;
        Ok(())
    }

    pub fn slic_options(&self) -> SlicOptions {
        SlicOptions::new(self.pixel_size)
            .compactness(self.compactness)
            .max_iterations(self.max_iterations)
    }

    pub fn kmeans_options(&self) -> KMeansOptions {
        KMeansOptions::new()
            .space(self.quantize_space)
            .seed(self.kmeans_seed)
            .batch_size(self.kmeans_batch_size)
            .iterations(self.kmeans_iterations)
    }

    /// The quantization strategy: the configured fixed palette if any,
    /// otherwise the configured derivation method.
    pub fn quantizer(&self) -> Quantizer {
        if let Some(palette) = self.palette_name.palette() {
            return Quantizer::FixedPalette(self.fit_palette(palette.clone()));
        }
        match self.quantize_method {
            QuantizeMethod::KMeans => Quantizer::KMeans(self.kmeans_options()),
            QuantizeMethod::MedianCut => Quantizer::MedianCut,
        }
    }

    pub fn dither_options(&self) -> DitherOptions {
        DitherOptions::new()
            .method(self.dithering_method)
            .strength(self.dithering_strength)
            .bit_depth(self.bit_depth)
    }

    pub fn adjust_options(&self) -> AdjustOptions {
        AdjustOptions::new()
            .brightness(self.brightness)
            .contrast(self.contrast)
            .saturation(self.saturation)
    }

    pub fn outline_options(&self) -> OutlineOptions {
        let jitter = match self.outline.jitter_seed {
            Some(seed) => Jitter::Seeded(seed),
            None => Jitter::Disabled,
        };
        OutlineOptions::new()
            .thickness(self.outline.thickness)
            .color(self.outline.color)
            .jitter(jitter)
    }

    /// Palette for the retro style: the configured preset, else Game Boy.
    pub fn retro_palette(&self) -> Palette {
        let palette = self
            .palette_name
            .palette()
            .cloned()
            .unwrap_or_else(palette::gameboy);
        self.fit_palette(palette)
    }

    fn fit_palette(&self, palette: Palette) -> Palette {
        if self.resample_palette {
            palette.resample(self.color_count)
        } else {
            palette
        }
    }

    /// Gray ramp for the monochrome style.
    pub fn monochrome_palette(&self) -> Palette {
        Palette::gray_ramp(self.color_count.clamp(2, MAX_MONOCHROME_LEVELS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
pixel_size: 8
style: retro
palette_name: c64
outline:
  enabled: true
  color: "255,0,0"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.pixel_size, 8);
        assert_eq!(config.style, Style::Retro);
        assert_eq!(config.palette_name, PaletteName::C64);
        assert!(config.outline.enabled);
        assert_eq!(config.outline.color, Rgb::new(255, 0, 0));
        assert_eq!(config.outline.thickness, 3);
        assert_eq!(config.color_count, 32);
        assert_eq!(config.grid, GridConfig::default());
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let yaml = "style: oil_paint\ndithering_method: error_diffusion\npalette_name: rainbow\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.style, Style::Basic);
        assert_eq!(config.dithering_method, DitherMethod::FloydSteinberg);
        assert_eq!(config.palette_name, PaletteName::None);
    }

    #[test]
    fn test_bad_color_string_is_a_parse_error() {
        let yaml = "grid:\n  color: \"1,2\"\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = Config {
            style: Style::Dithered,
            quantize_space: QuantizeSpace::Lab,
            outline: OutlineConfig {
                enabled: true,
                jitter_seed: Some(9),
                ..OutlineConfig::default()
            },
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases: Vec<(Config, &str)> = vec![
            (Config { pixel_size: 0, ..Config::default() }, "pixel_size"),
            (Config { pixel_size: 4097, ..Config::default() }, "pixel_size"),
            (Config { pixel_size: usize::MAX, ..Config::default() }, "pixel_size"),
            (Config { edge_smoothing: 1.5, ..Config::default() }, "edge_smoothing"),
            (Config { edge_harden: -0.1, ..Config::default() }, "edge_harden"),
            (Config { color_count: 1, ..Config::default() }, "color_count"),
            (Config { color_count: 257, ..Config::default() }, "color_count"),
            (Config { compactness: 0.0, ..Config::default() }, "compactness"),
            (Config { compactness: f64::NAN, ..Config::default() }, "compactness"),
            (Config { max_iterations: 0, ..Config::default() }, "max_iterations"),
            (Config { dithering_strength: 1.5, ..Config::default() }, "dithering_strength"),
            (Config { bit_depth: 9, ..Config::default() }, "bit_depth"),
            (Config { brightness: 0.0, ..Config::default() }, "brightness"),
            (Config { contrast: 3.5, ..Config::default() }, "contrast"),
            (Config { saturation: f32::NAN, ..Config::default() }, "saturation"),
            (
                Config {
                    outline: OutlineConfig { thickness: 0, ..OutlineConfig::default() },
                    ..Config::default()
                },
                "outline.thickness",
            ),
        ];
        for (config, option) in cases {
            let err = config.validate().unwrap_err();
            assert_eq!(err.option, option);
        }
    }

    #[test]
    fn test_quantizer_resolution() {
        assert!(matches!(Config::default().quantizer(), Quantizer::KMeans(_)));
        let config = Config {
            quantize_method: QuantizeMethod::MedianCut,
            ..Config::default()
        };
        assert_eq!(config.quantizer(), Quantizer::MedianCut);
        let config = Config {
            palette_name: PaletteName::Gameboy,
            quantize_method: QuantizeMethod::MedianCut,
            ..Config::default()
        };
        assert!(matches!(config.quantizer(), Quantizer::FixedPalette(_)));
    }

    #[test]
    fn test_retro_palette_defaults_to_gameboy() {
        let gameboy = PaletteName::Gameboy.palette().unwrap();
        assert_eq!(&Config::default().retro_palette(), gameboy);
        let config = Config {
            palette_name: PaletteName::Nes,
            ..Config::default()
        };
        assert_eq!(config.retro_palette().len(), 16);
    }

    #[test]
    fn test_pixel_size_upper_bound_accepted() {
        let config = Config {
            pixel_size: MAX_PIXEL_SIZE,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resample_palette_fits_color_count() {
        let config = Config {
            palette_name: PaletteName::Nes,
            color_count: 4,
            resample_palette: true,
            ..Config::default()
        };
        assert_eq!(config.retro_palette().len(), 4);
        match config.quantizer() {
            Quantizer::FixedPalette(palette) => assert_eq!(palette.len(), 4),
            other => panic!("expected a fixed palette, got {other:?}"),
        }

        // Game Boy stretched from 4 to 8 entries
        let config = Config {
            color_count: 8,
            resample_palette: true,
            ..Config::default()
        };
        assert_eq!(config.retro_palette().len(), 8);
        assert_eq!(Config::default().retro_palette().len(), 4);
    }

    #[test]
    fn test_monochrome_levels_clamped() {
        assert_eq!(Config::default().monochrome_palette().len(), 16);
        let config = Config {
            color_count: 4,
            ..Config::default()
        };
        assert_eq!(config.monochrome_palette().len(), 4);
    }

    #[test]
    fn test_outline_jitter_from_seed() {
        let config = Config {
            outline: OutlineConfig {
                jitter_seed: Some(3),
                ..OutlineConfig::default()
            },
            ..Config::default()
        };
        assert_eq!(config.outline_options().jitter, Jitter::Seeded(3));
        assert_eq!(Config::default().outline_options().jitter, Jitter::Disabled);
    }
}
