//! Adjustment options.

/// Brightness, contrast and saturation factors.
///
/// # Defaults
///
/// All factors default to `1.0` (no change).
///
/// # Example
///
/// ```
/// use pixel_stylize::AdjustOptions;
///
/// assert!(AdjustOptions::new().is_identity());
///
/// let options = AdjustOptions::new().contrast(1.2).saturation(0.0);
/// assert!(!options.is_identity());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustOptions {
    /// Brightness multiplier.
    ///
    /// - 1.0 = no change
    /// - 0.5 = half as bright
    pub brightness: f32,

    /// Contrast around the mean luma.
    ///
    /// - 1.0 = no change
    /// - 0.0 = flat gray
    pub contrast: f32,

    /// Saturation relative to grayscale.
    ///
    /// - 1.0 = no change
    /// - 0.0 = grayscale
    pub saturation: f32,
}

impl Default for AdjustOptions {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
        }
    }
}

impl AdjustOptions {
    /// Create new adjustment options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn brightness(mut self, factor: f32) -> Self {
        self.brightness = factor;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    /// `true` when every factor is exactly `1.0`.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.brightness == 1.0 && self.contrast == 1.0 && self.saturation == 1.0
    }
}
