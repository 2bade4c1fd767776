//! Style presets and pipeline stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of the stylization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Brightness, contrast and saturation.
    Adjust,
    /// SLIC superpixels, or block averaging when grid alignment is on.
    Segment,
    /// Reduce to `color_count` colors (or map to the configured palette).
    Quantize,
    Dither,
    /// Map to the retro palette (configured preset, else Game Boy).
    RetroPalette,
    /// Map to an evenly spaced gray ramp.
    MonochromePalette,
    /// Blend with a Gaussian blur of the image.
    EdgeSmoothing,
    /// Unsharp mask that steepens color edges.
    EdgeHarden,
    /// Blend with inverted luma edges.
    Cartoon,
    Outline,
    GridLines,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Adjust => "adjust",
            Stage::Segment => "segment",
            Stage::Quantize => "quantize",
            Stage::Dither => "dither",
            Stage::RetroPalette => "retro_palette",
            Stage::MonochromePalette => "monochrome_palette",
            Stage::EdgeSmoothing => "edge_smoothing",
            Stage::EdgeHarden => "edge_harden",
            Stage::Cartoon => "cartoon",
            Stage::Outline => "outline",
            Stage::GridLines => "grid_lines",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named stylization preset.
///
/// Each style is a fixed, ordered list of core stages; see
/// [`Style::stages`]. Unknown names fall back to [`Style::Basic`] with a
/// warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    /// Superpixels only.
    #[default]
    Basic,
    /// Superpixels, then color quantization.
    Quantized,
    /// Superpixels, quantization, then dithering.
    Dithered,
    /// Superpixels mapped onto a retro console palette.
    Retro,
    /// Superpixels mapped onto a gray ramp.
    Monochrome,
}

impl Style {
    pub const ALL: &'static [Style] = &[
        Style::Basic,
        Style::Quantized,
        Style::Dithered,
        Style::Retro,
        Style::Monochrome,
    ];

    /// Core stages in execution order.
    ///
    /// ```
    /// use pixel_stylize::{Stage, Style};
    ///
    /// assert_eq!(
    ///     Style::Dithered.stages(),
    ///     &[Stage::Segment, Stage::Quantize, Stage::Dither]
    /// );
    /// ```
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Style::Basic => &[Stage::Segment],
            Style::Quantized => &[Stage::Segment, Stage::Quantize],
            Style::Dithered => &[Stage::Segment, Stage::Quantize, Stage::Dither],
            Style::Retro => &[Stage::Segment, Stage::RetroPalette],
            Style::Monochrome => &[Stage::Segment, Stage::MonochromePalette],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Basic => "basic",
            Style::Quantized => "quantized",
            Style::Dithered => "dithered",
            Style::Retro => "retro",
            Style::Monochrome => "monochrome",
        }
    }

    /// Strict lookup. Returns `None` for unknown names.
    pub fn lookup(name: &str) -> Option<Self> {
        let key = name.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|s| s.as_str() == key)
    }

    /// Lenient lookup: unknown names fall back to [`Style::Basic`].
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(style = name, "unknown style, using basic");
            Style::Basic
        })
    }

    /// Style for a legacy pixelation algorithm name.
    ///
    /// `average` and `median` quantize; `basic` and `slic` do not. Unknown
    /// names fall back to [`Style::Basic`] with a warning.
    ///
    /// ```
    /// use pixel_stylize::Style;
    ///
    /// assert_eq!(Style::from_algorithm("median"), Style::Quantized);
    /// assert_eq!(Style::from_algorithm("slic"), Style::Basic);
    /// ```
    pub fn from_algorithm(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "basic" | "slic" => Style::Basic,
            "average" | "median" => Style::Quantized,
            _ => {
                tracing::warn!(algorithm = name, "unknown algorithm, using basic");
                Style::Basic
            }
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Style {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        style.as_str().to_string()
    }
}
