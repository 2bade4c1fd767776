use crate::error::RenderError;
use crate::rendering::{decode_png, encode_png};
use crate::services::ProgressReporter;
use pixel_stylize::{Config, RgbImage, Stylizer};
use std::path::Path;
use std::time::Instant;

/// Load -> stylize -> save orchestration around one validated configuration.
pub struct RenderService {
    stylizer: Stylizer,
}

impl RenderService {
    /// Validate `config` and build the service.
    pub fn new(config: Config) -> Result<Self, RenderError> {
        Ok(Self {
            stylizer: Stylizer::new(config)?,
        })
    }

    pub fn config(&self) -> &Config {
        self.stylizer.config()
    }

    /// Stylize PNG bytes into PNG bytes.
    pub fn render_bytes(
        &self,
        png: &[u8],
        progress: &ProgressReporter,
    ) -> Result<Vec<u8>, RenderError> {
        let image = decode_png(png)?;
        progress.report(15, "Image loaded");
        let result = self.stylize(&image, progress)?;
        encode_png(&result)
    }

    /// Stylize the PNG at `input` and write the result to `output`.
    pub fn render_file(
        &self,
        input: &Path,
        output: &Path,
        progress: &ProgressReporter,
    ) -> Result<(), RenderError> {
        let bytes = std::fs::read(input)?;
        let png = self.render_bytes(&bytes, progress)?;
        std::fs::write(output, &png)?;
        tracing::info!(
            output = %output.display(),
            bytes = png.len(),
            "Wrote PNG"
        );
        Ok(())
    }

    /// Render every style side by side and return the grid as PNG bytes.
    pub fn compare_bytes(&self, png: &[u8]) -> Result<Vec<u8>, RenderError> {
        let image = decode_png(png)?;
        let start = Instant::now();
        let grid = self.stylizer.compare(&image)?;
        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered comparison grid"
        );
        encode_png(&grid)
    }

    pub fn compare_file(&self, input: &Path, output: &Path) -> Result<(), RenderError> {
        let bytes = std::fs::read(input)?;
        let png = self.compare_bytes(&bytes)?;
        std::fs::write(output, png)?;
        Ok(())
    }

    fn stylize(
        &self,
        image: &RgbImage,
        progress: &ProgressReporter,
    ) -> Result<RgbImage, RenderError> {
        let result = self.stylizer.stylize_with(image, |event| {
            progress.report_stage(event.index, event.total, event.stage.as_str());
        })?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_stylize::{PaletteName, Rgb, Style};

    fn sample_png() -> Vec<u8> {
        let pixels = (0..32 * 24)
            .map(|i| {
                let (x, y) = (i % 32, i / 32);
                Rgb::new((x * 8) as u8, (y * 10) as u8, 128)
            })
            .collect();
        encode_png(&RgbImage::from_pixels(32, 24, pixels).unwrap()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = RenderService::new(Config {
            pixel_size: 0,
            ..Config::default()
        });
        assert!(matches!(result, Err(RenderError::Stylize(_))));
    }

    #[test]
    fn test_render_bytes_keeps_dimensions() {
        let service = RenderService::new(Config {
            pixel_size: 4,
            color_count: 8,
            style: Style::Quantized,
            ..Config::default()
        })
        .unwrap();
        let out = service
            .render_bytes(&sample_png(), &ProgressReporter::disabled())
            .unwrap();
        let image = decode_png(&out).unwrap();
        assert_eq!((image.width(), image.height()), (32, 24));
        assert!(image.distinct_colors() <= 8);
    }

    #[test]
    fn test_retro_render_uses_palette() {
        let service = RenderService::new(Config {
            pixel_size: 4,
            style: Style::Retro,
            palette_name: PaletteName::C64,
            ..Config::default()
        })
        .unwrap();
        let out = service
            .render_bytes(&sample_png(), &ProgressReporter::disabled())
            .unwrap();
        let image = decode_png(&out).unwrap();
        let c64 = PaletteName::C64.palette().unwrap();
        assert!(image.pixels().iter().all(|&p| c64.contains(p)));
    }

    #[test]
    fn test_compare_bytes_grid_size() {
        let service = RenderService::new(Config {
            pixel_size: 4,
            color_count: 4,
            ..Config::default()
        })
        .unwrap();
        let grid = decode_png(&service.compare_bytes(&sample_png()).unwrap()).unwrap();
        assert_eq!((grid.width(), grid.height()), (96, 2 * (24 + 30)));
    }

    #[test]
    fn test_render_bytes_rejects_garbage() {
        let service = RenderService::new(Config::default()).unwrap();
        let err = service
            .render_bytes(b"garbage", &ProgressReporter::disabled())
            .unwrap_err();
        assert!(matches!(err, RenderError::Decode(_)));
    }
}
