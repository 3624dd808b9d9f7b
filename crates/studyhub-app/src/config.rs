//! Shell configuration loaded from an optional JSON file.

use crate::error::{AppError, AppResult};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use studyhub_core::HexColor;
use studyhub_core::storage::BOARD_KEY;
use studyhub_render::{GRID_SPACING, GridStyle};

/// Application configuration.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Viewport width in pixels, used for replay and export.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    pub background: HexColor,
    pub show_grid: bool,
    pub grid_spacing: f64,
    /// Board data directory. `None` uses the platform data directory.
    pub storage_dir: Option<PathBuf>,
    /// Export directory. `None` uses the user's pictures directory.
    pub export_dir: Option<PathBuf>,
    /// Storage key the board is saved under.
    pub board_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "StudyHub".to_string(),
            width: 1280,
            height: 800,
            background: HexColor::new(0x03, 0x03, 0x0a),
            show_grid: true,
            grid_spacing: GRID_SPACING,
            storage_dir: None,
            export_dir: None,
            board_key: BOARD_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn grid_style(&self) -> GridStyle {
        if self.show_grid {
            GridStyle::Dots
        } else {
            GridStyle::None
        }
    }

    pub fn background_color(&self) -> Color {
        self.background.to_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!((config.width, config.height), (1280, 800));
        assert_eq!(config.background.to_hex(), "#03030a");
        assert_eq!(config.grid_style(), GridStyle::Dots);
        assert_eq!(config.board_key, "study-hub-board");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(
            r##"{"width": 640, "background": "#fff", "show_grid": false}"##,
        )
        .unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 800);
        assert_eq!(config.background, HexColor::white());
        assert_eq!(config.grid_style(), GridStyle::None);
        assert!((config.grid_spacing - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"width": "wide"}"#).unwrap();
        assert!(matches!(AppConfig::load(&path), Err(AppError::Config { .. })));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"title": "Revision", "export_dir": "/tmp/out"}"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.title, "Revision");
        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/out")));
    }
}
