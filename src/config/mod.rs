// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[viewer]` - Zoom factor of the image viewer
//! - `[storage]` - Where the gallery keeps its persisted collections
//! - `[download]` - Target directory for downloaded artworks
//! - `[logging]` - Tracing filter
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `GALLERY_LENS_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use gallery_lens::config;
//!
//! let (mut config, _warning) = config::load();
//! config.viewer.zoom_factor = Some(2.0);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Image viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Multiplier applied per zoom step.
    #[serde(default = "default_zoom_factor", skip_serializing_if = "Option::is_none")]
    pub zoom_factor: Option<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_factor: default_zoom_factor(),
        }
    }
}

impl ViewerConfig {
    /// Zoom factor clamped to the accepted range.
    #[must_use]
    pub fn zoom_factor(&self) -> f32 {
        self.zoom_factor
            .filter(|factor| factor.is_finite())
            .unwrap_or(DEFAULT_ZOOM_FACTOR)
            .clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR)
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the persisted collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Download settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DownloadConfig {
    /// Directory downloaded artworks are saved into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl DownloadConfig {
    /// Configured directory, else the platform download directory, else `.`.
    #[must_use]
    pub fn resolve_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `gallery_lens=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_zoom_factor() -> Option<f32> {
    Some(DEFAULT_ZOOM_FACTOR)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    let path = get_config_path_with_override(base_dir)
        .ok_or_else(|| Error::Config("no config directory available".to_string()))?;
    save_to_path(config, &path)
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let config = Config {
            viewer: ViewerConfig {
                zoom_factor: Some(2.0),
            },
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("/tmp/gallery")),
            },
            download: DownloadConfig {
                directory: Some(PathBuf::from("/tmp/downloads")),
            },
            logging: LoggingConfig {
                filter: Some("gallery_lens=debug".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_with_override_warns_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "not = valid = toml")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[logging]\nfilter = \"warn\"\n").expect("write");

        let config = load_from_path(&path).expect("load");

        assert_eq!(config.logging.filter.as_deref(), Some("warn"));
        assert_eq!(config.viewer.zoom_factor, Some(DEFAULT_ZOOM_FACTOR));
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn zoom_factor_is_clamped() {
        let viewer = ViewerConfig {
            zoom_factor: Some(100.0),
        };
        assert_eq!(viewer.zoom_factor(), MAX_ZOOM_FACTOR);

        let viewer = ViewerConfig {
            zoom_factor: Some(0.5),
        };
        assert_eq!(viewer.zoom_factor(), MIN_ZOOM_FACTOR);

        let viewer = ViewerConfig { zoom_factor: None };
        assert_eq!(viewer.zoom_factor(), DEFAULT_ZOOM_FACTOR);
    }

    #[test]
    fn configured_download_directory_wins() {
        let download = DownloadConfig {
            directory: Some(PathBuf::from("/srv/art")),
        };
        assert_eq!(download.resolve_directory(), PathBuf::from("/srv/art"));
    }
}
