//! `[build.images]`: which variants the asset pipeline produces.

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Encode a WebP alternate next to each original.
    pub webp: bool,
    /// Inline a blurred low-quality preview.
    pub preview: bool,
    /// Preview width in pixels; height keeps the aspect ratio.
    pub preview_width: u32,
    /// Gaussian blur sigma applied to the preview.
    pub preview_blur: f32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            webp: true,
            preview: true,
            preview_width: 20,
            preview_blur: 1.5,
        }
    }
}

impl ImageConfig {
    pub const PREVIEW_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 4..=64;

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !Self::PREVIEW_WIDTH_RANGE.contains(&self.preview_width) {
            diag.error_with_hint(
                "build.images.preview_width",
                format!("{} is out of range", self.preview_width),
                format!(
                    "use a width between {} and {}",
                    Self::PREVIEW_WIDTH_RANGE.start(),
                    Self::PREVIEW_WIDTH_RANGE.end()
                ),
            );
        }
        if !self.preview_blur.is_finite() || self.preview_blur < 0.0 {
            diag.error(
                "build.images.preview_blur",
                "blur sigma must be a non-negative number",
            );
        }
    }
}
