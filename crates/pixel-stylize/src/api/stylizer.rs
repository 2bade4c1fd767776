//! Stylizer -- runs a style's stage list under a validated [`Config`].

use std::time::Instant;

use super::config::Config;
use super::error::StylizeError;
use super::style::{Stage, Style};
use crate::color::Rgb;
use crate::dither::dither;
use crate::filter::{cartoon, harden_edges, smooth_edges, CARTOON_EDGE_WEIGHT};
use crate::image::RgbImage;
use crate::outline::{draw_grid_lines, draw_outline};
use crate::palette::map_to_palette;
use crate::preprocess::adjust;
use crate::quantize::Quantizer;
use crate::segment::{align_to_grid, segment};

/// Height of the blank band above each tile of a comparison grid.
const COMPARE_HEADER: usize = 30;
/// Tiles per row of a comparison grid.
const COMPARE_COLUMNS: usize = 3;

/// Reported to the observer after each stage completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEvent {
    pub stage: Stage,
    /// Zero-based position of `stage` in the run.
    pub index: usize,
    /// Number of stages in the run.
    pub total: usize,
}

/// Stylization pipeline bound to one validated configuration.
///
/// The configuration is checked once in [`Stylizer::new`] and never
/// changes afterwards. [`stylize`](Self::stylize) takes `&self`, so one
/// stylizer can process any number of images.
///
/// # Example
///
/// ```
/// use pixel_stylize::{Config, Rgb, RgbImage, Style, Stylizer};
///
/// let stylizer = Stylizer::new(Config {
///     pixel_size: 4,
///     color_count: 4,
///     style: Style::Quantized,
///     ..Config::default()
/// })
/// .unwrap();
///
/// let pixels = (0..64u8).map(|i| Rgb::new(i * 4, 128, 255 - i * 4)).collect();
/// let image = RgbImage::from_pixels(8, 8, pixels).unwrap();
/// let out = stylizer.stylize(&image).unwrap();
///
/// assert_eq!((out.width(), out.height()), (8, 8));
/// assert!(out.distinct_colors() <= 4);
/// ```
#[derive(Debug, Clone)]
pub struct Stylizer {
    config: Config,
}

impl Stylizer {
    /// Validate `config` and build a stylizer around it.
    pub fn new(config: Config) -> Result<Self, StylizeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stages a run will execute, in order.
    ///
    /// The style's own list, with `Adjust` in front when any enhancement
    /// factor differs from 1.0. Enabled post-processing follows in the
    /// order `EdgeSmoothing`, `EdgeHarden`, `Cartoon`, `Outline`,
    /// `GridLines`.
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = Vec::with_capacity(9);
        if !self.config.adjust_options().is_identity() {
            stages.push(Stage::Adjust);
        }
        stages.extend_from_slice(self.config.style.stages());
        if self.config.edge_smoothing > 0.0 {
            stages.push(Stage::EdgeSmoothing);
        }
        if self.config.edge_harden > 0.0 {
            stages.push(Stage::EdgeHarden);
        }
        if self.config.cartoon {
            stages.push(Stage::Cartoon);
        }
        if self.config.outline.enabled {
            stages.push(Stage::Outline);
        }
        if self.config.grid.enabled {
            stages.push(Stage::GridLines);
        }
        stages
    }

    /// Run every stage on `image`.
    pub fn stylize(&self, image: &RgbImage) -> Result<RgbImage, StylizeError> {
        self.stylize_with(image, |_| {})
    }

    /// Run every stage on `image`, calling `observer` after each one.
    ///
    /// On error nothing is returned but the error; the observer has seen
    /// only the stages that completed.
    pub fn stylize_with<F>(&self, image: &RgbImage, mut observer: F) -> Result<RgbImage, StylizeError>
    where
        F: FnMut(StageEvent),
    {
        let start = Instant::now();
        let stages = self.stages();
        let total = stages.len();
        tracing::info!(
            width = image.width(),
            height = image.height(),
            style = %self.config.style,
            stages = total,
            "stylize started"
        );

        let mut current = image.clone();
        for (index, &stage) in stages.iter().enumerate() {
            let stage_start = Instant::now();
            current = self.run_stage(stage, &current)?;
            tracing::debug!(
                %stage,
                elapsed_ms = stage_start.elapsed().as_millis() as u64,
                "stage finished"
            );
            observer(StageEvent {
                stage,
                index,
                total,
            });
        }

        tracing::info!(
            width = current.width(),
            height = current.height(),
            colors = current.distinct_colors(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "stylize finished"
        );
        Ok(current)
    }

    fn run_stage(&self, stage: Stage, image: &RgbImage) -> Result<RgbImage, StylizeError> {
        let config = &self.config;
        let fail = |cause: String| StylizeError::StageFailure {
            stage,
            width: image.width(),
            height: image.height(),
            cause,
        };

        let out = match stage {
            Stage::Adjust => adjust(image, &config.adjust_options()),
            Stage::Segment if config.align_grid => align_to_grid(image, config.pixel_size),
            Stage::Segment => {
                let seg = segment(image, &config.slic_options());
                seg.labels
                    .check(seg.centers.len())
                    .map_err(|e| fail(e.to_string()))?;
                seg.image
            }
            Stage::Quantize => {
                let quantizer = config.quantizer();
                let out = quantizer.quantize(image, config.color_count);
                let derived = !matches!(quantizer, Quantizer::FixedPalette(_));
                let colors = out.distinct_colors();
                if derived && colors > config.color_count {
                    return Err(fail(format!(
                        "{colors} colors after quantizing to {}",
                        config.color_count
                    )));
                }
                out
            }
            Stage::Dither => dither(image, &config.dither_options()),
            Stage::RetroPalette => map_to_palette(image, &config.retro_palette()),
            Stage::MonochromePalette => map_to_palette(image, &config.monochrome_palette()),
            Stage::EdgeSmoothing => smooth_edges(image, config.edge_smoothing),
            Stage::EdgeHarden => harden_edges(image, config.edge_harden),
            Stage::Cartoon => cartoon(image, CARTOON_EDGE_WEIGHT),
            Stage::Outline => draw_outline(image, config.pixel_size, &config.outline_options()),
            Stage::GridLines => draw_grid_lines(image, config.pixel_size, config.grid.color),
        };
        Ok(out)
    }

    /// Render `image` in every style and tile the results.
    ///
    /// Tiles are laid out row-major in [`Style::ALL`] order, three per row,
    /// each below a 30-pixel black band. Unused cells stay black. All other
    /// settings (adjustment, outline, grid) apply to every tile.
    pub fn compare(&self, image: &RgbImage) -> Result<RgbImage, StylizeError> {
        let (w, h) = (image.width(), image.height());
        let tile_h = h + COMPARE_HEADER;
        let rows = Style::ALL.len().div_ceil(COMPARE_COLUMNS);
        let mut grid = RgbImage::filled(COMPARE_COLUMNS * w, rows * tile_h, Rgb::BLACK)?;

        for (i, &style) in Style::ALL.iter().enumerate() {
            let stylizer = Stylizer {
                config: Config {
                    style,
                    ..self.config.clone()
                },
            };
            let tile = stylizer.stylize(image)?;
            let x0 = (i % COMPARE_COLUMNS) * w;
            let y0 = (i / COMPARE_COLUMNS) * tile_h + COMPARE_HEADER;
            for y in 0..h {
                let dst = (y0 + y) * grid.width() + x0;
                grid.pixels_mut()[dst..dst + w].copy_from_slice(tile.row(y));
            }
        }
        Ok(grid)
    }
}
