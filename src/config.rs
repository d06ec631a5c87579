// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON under the platform config directory. Missing files and
//! missing fields fall back to defaults so older config files keep working.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_MARKER_COLOR, DEFAULT_MARKER_SIZE,
    DEFAULT_WINDOW_SIZE,
};
use crate::errors::{AppError, AppResult};
use crate::tracking::{CentroidTracker, NanPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames averaged into one centroid
    pub window_size: usize,
    /// How NaN depth samples are treated by the nearest-point search
    pub nan_policy: NanPolicy,
    /// fPOI marker edge length in pixels
    pub marker_size: u32,
    /// fPOI marker color (RGBA)
    pub marker_color: [u8; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            nan_policy: NanPolicy::default(),
            marker_size: DEFAULT_MARKER_SIZE,
            marker_color: DEFAULT_MARKER_COLOR,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, using defaults when absent
    pub fn load() -> AppResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific file, using defaults when it does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;

        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("{}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.window_size == 0 {
            return Err(AppError::Config("window_size must be at least 1".into()));
        }
        if self.marker_size == 0 {
            return Err(AppError::Config("marker_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Build a tracker using this config's window and NaN policy
    pub fn tracker(&self) -> AppResult<CentroidTracker> {
        Ok(CentroidTracker::with_settings(
            self.window_size,
            self.nan_policy,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "window_size": 30 }"#).unwrap();
        assert_eq!(config.window_size, 30);
        assert_eq!(config.nan_policy, NanPolicy::Zero);
        assert_eq!(config.marker_size, DEFAULT_MARKER_SIZE);
    }

    #[test]
    fn test_nan_policy_serialized_by_name() {
        let config = Config {
            nan_policy: NanPolicy::Exclude,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""nan_policy":"Exclude""#));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = Config {
            window_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
        assert!(config.tracker().is_err());
    }
}
