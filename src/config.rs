use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{MockupError, MockupResult};

/// Session configuration.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MockupConfig {
    /// Directory searched for frame/icon art before the built-in art.
    pub assets_root: Option<PathBuf>,
    /// Straight-alpha colour the surface is cleared to at the start of every generation.
    pub background_rgba: [u8; 4],
    /// Keep decoded static art in memory across generations.
    pub cache_assets: bool,
    /// Upper bound on a single icon load before it is treated as failed.
    pub icon_timeout_ms: u64,
    /// Clock overlay styling.
    pub clock: ClockStyle,
}

impl Default for MockupConfig {
    fn default() -> Self {
        Self {
            assets_root: None,
            background_rgba: [0, 0, 0, 0],
            cache_assets: true,
            icon_timeout_ms: 5_000,
            clock: ClockStyle::default(),
        }
    }
}

/// Fixed styling of the clock overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockStyle {
    /// Explicit font file; when unset a bold sans-serif system face is used.
    pub font_path: Option<PathBuf>,
    /// Family names tried, in order, when searching system fonts.
    pub font_families: Vec<String>,
    /// Font size in pixels.
    pub size_px: f32,
    /// Baseline position from the top of the surface.
    pub baseline_y: f32,
    /// Straight-alpha text colour.
    pub color_rgba: [u8; 4],
    /// Straight-alpha shadow colour.
    pub shadow_rgba: [u8; 4],
    /// Shadow blur extent in pixels (Gaussian sigma is half of this).
    pub shadow_blur_px: f32,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self {
            font_path: None,
            font_families: vec![
                "Arial".to_string(),
                "Helvetica".to_string(),
                "Liberation Sans".to_string(),
                "DejaVu Sans".to_string(),
            ],
            size_px: 24.0,
            baseline_y: 40.0,
            color_rgba: [255, 255, 255, 255],
            shadow_rgba: [0, 0, 0, 128],
            shadow_blur_px: 4.0,
        }
    }
}

impl MockupConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> MockupResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| MockupError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> MockupResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> MockupResult<()> {
        if self.icon_timeout_ms == 0 {
            return Err(MockupError::validation("icon_timeout_ms must be > 0"));
        }
        let clock = &self.clock;
        if !clock.size_px.is_finite() || clock.size_px <= 0.0 {
            return Err(MockupError::validation(
                "clock.size_px must be finite and > 0",
            ));
        }
        if !clock.baseline_y.is_finite() {
            return Err(MockupError::validation("clock.baseline_y must be finite"));
        }
        if !clock.shadow_blur_px.is_finite() || clock.shadow_blur_px < 0.0 {
            return Err(MockupError::validation(
                "clock.shadow_blur_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Icon load timeout as a duration.
    pub fn icon_timeout(&self) -> Duration {
        Duration::from_millis(self.icon_timeout_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
