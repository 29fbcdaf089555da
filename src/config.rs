//! Gallery configuration.
//!
//! A small JSON file tunes the fixed constants; every field has a default
//! so a partial file (or none at all) works. An explicitly given path must
//! parse; the implicit per-user path falls back to defaults with a warning.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Smallest raster the builders accept.
pub const MIN_IMAGE_SIZE: u32 = 25;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Side length of the three generated rasters, in pixels.
    #[serde(default = "default_image_size")]
    pub image_size: u32,
    /// Milliseconds between animation steps.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Use the per-axis diagnostic step table instead of the production one.
    #[serde(default)]
    pub diagnostic: bool,
    /// Side length of each panel's drawable area, in pixels.
    #[serde(default = "default_panel_px")]
    pub panel_px: u32,
    /// Visible lines in the status-log panel.
    #[serde(default = "default_log_rows")]
    pub log_rows: u16,
}

fn default_image_size() -> u32 {
    MIN_IMAGE_SIZE
}

fn default_tick_ms() -> u64 {
    1600
}

fn default_panel_px() -> u32 {
    49
}

fn default_log_rows() -> u16 {
    8
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            image_size: default_image_size(),
            tick_ms: default_tick_ms(),
            diagnostic: false,
            panel_px: default_panel_px(),
            log_rows: default_log_rows(),
        }
    }
}

impl GalleryConfig {
    /// Load from the per-user config path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str::<Self>(&json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: invalid gallery config ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Load from an explicit path; unlike `load`, failures are errors.
    pub fn load_from(path: &str) -> Result<Self> {
        let json =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
        let config: Self =
            serde_json::from_str(&json).with_context(|| format!("Failed to parse {path}"))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.image_size >= MIN_IMAGE_SIZE,
            "image_size must be at least {MIN_IMAGE_SIZE}, got {}",
            self.image_size,
        );
        ensure!(
            self.panel_px >= self.image_size,
            "panel_px ({}) must not be smaller than image_size ({})",
            self.panel_px,
            self.image_size,
        );
        ensure!(self.tick_ms >= 1, "tick_ms must be at least 1");
        ensure!(self.log_rows >= 1, "log_rows must be at least 1");
        Ok(())
    }

    fn config_path() -> std::path::PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = std::path::PathBuf::from(home);
        path.push(".config");
        path.push("affine-gallery");
        path.push("config.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_constants() {
        let config = GalleryConfig::default();
        assert_eq!(config.image_size, 25);
        assert_eq!(config.tick_ms, 1600);
        assert!(!config.diagnostic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: GalleryConfig = serde_json::from_str(r#"{"diagnostic": true}"#).unwrap();
        assert!(config.diagnostic);
        assert_eq!(config.image_size, 25);
        assert_eq!(config.tick_ms, 1600);
    }

    #[test]
    fn validate_rejects_undersized_images() {
        let config = GalleryConfig {
            image_size: 10,
            ..GalleryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_panel_smaller_than_image() {
        let config = GalleryConfig {
            image_size: 30,
            panel_px: 29,
            ..GalleryConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
