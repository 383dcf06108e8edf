// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[api]` - Remote endpoints for the image list and upload URL
//! - `[upload]` - Upload target, form values and JPEG quality
//! - `[display]` - Gallery layout
//!
//! # Examples
//!
//! ```no_run
//! use gallery_editor::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Remote endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// GET endpoint returning the image list.
    #[serde(default = "default_images_url")]
    pub images_url: String,

    /// GET endpoint returning the upload target URL.
    #[serde(default = "default_upload_url_endpoint")]
    pub upload_url_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            images_url: default_images_url(),
            upload_url_endpoint: default_upload_url_endpoint(),
        }
    }
}

/// Upload settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Fixed POST target. When unset, the target is requested from
    /// `api.upload_url_endpoint` before each upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,

    /// Value of the `appid` form field.
    #[serde(default = "default_app_id")]
    pub app_id: String,

    /// Value of the `Authorization` header.
    #[serde(default = "default_authorization")]
    pub authorization: String,

    /// Filename of the uploaded attachment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// JPEG quality (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg_quality: Option<u8>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            target_url: None,
            app_id: default_app_id(),
            authorization: default_authorization(),
            filename: None,
            jpeg_quality: Some(DEFAULT_JPEG_QUALITY),
        }
    }
}

impl UploadConfig {
    /// Attachment filename, derived from the app id when not configured.
    #[must_use]
    pub fn filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| format!("{}_test.jpg", self.app_id))
    }

    /// JPEG quality clamped to the encoder's accepted range.
    #[must_use]
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
            .unwrap_or(DEFAULT_JPEG_QUALITY)
            .clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
    }
}

/// Gallery display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Number of columns in the gallery grid.
    #[serde(default = "default_grid_columns", skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<u16>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            grid_columns: default_grid_columns(),
        }
    }
}

impl DisplayConfig {
    /// Grid columns clamped to the supported range.
    #[must_use]
    pub fn grid_columns(&self) -> u16 {
        self.grid_columns
            .unwrap_or(DEFAULT_GRID_COLUMNS)
            .clamp(MIN_GRID_COLUMNS, MAX_GRID_COLUMNS)
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_images_url() -> String {
    DEFAULT_IMAGES_URL.to_string()
}

fn default_upload_url_endpoint() -> String {
    DEFAULT_UPLOAD_URL_ENDPOINT.to_string()
}

fn default_app_id() -> String {
    DEFAULT_APP_ID.to_string()
}

fn default_authorization() -> String {
    DEFAULT_AUTHORIZATION.to_string()
}

fn default_grid_columns() -> Option<u16> {
    Some(DEFAULT_GRID_COLUMNS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

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
/// default config with an i18n key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Falling back to default config");
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
    let config: Config = toml::from_str(&content)?;
    Ok(config)
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
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Writes `config` to the default location unless a file already exists.
///
/// Returns `true` when a file was created.
pub fn save_if_missing(config: &Config) -> Result<bool> {
    save_if_missing_with_override(config, None)
}

/// Same as [`save_if_missing`] for a custom directory.
pub fn save_if_missing_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<bool> {
    match get_config_path_with_override(base_dir) {
        Some(path) if !path.exists() => save_to_path(config, &path).map(|()| true),
        _ => Ok(false),
    }
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            api: ApiConfig {
                images_url: "http://localhost:8080/image".to_string(),
                upload_url_endpoint: "http://localhost:8080/upload".to_string(),
            },
            upload: UploadConfig {
                target_url: Some("http://localhost:8080/post".to_string()),
                app_id: "tester".to_string(),
                authorization: "Client-ID abc".to_string(),
                filename: None,
                jpeg_quality: Some(55),
            },
            display: DisplayConfig {
                grid_columns: Some(4),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[upload\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_file_loads_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[upload]\napp_id = \"someone\"\n").expect("write config");

        let loaded = load_from_path(&config_path).expect("partial config should load");

        assert_eq!(loaded.upload.app_id, "someone");
        assert_eq!(loaded.upload.authorization, DEFAULT_AUTHORIZATION);
        assert_eq!(loaded.api.images_url, DEFAULT_IMAGES_URL);
        assert_eq!(loaded.display.grid_columns(), DEFAULT_GRID_COLUMNS);
    }

    #[test]
    fn upload_filename_derives_from_app_id() {
        let upload = UploadConfig {
            app_id: "someone".to_string(),
            ..UploadConfig::default()
        };
        assert_eq!(upload.filename(), "someone_test.jpg");
        assert_eq!(UploadConfig::default().filename(), "andresliu22_test.jpg");

        let custom = UploadConfig {
            filename: Some("edit.jpg".to_string()),
            ..UploadConfig::default()
        };
        assert_eq!(custom.filename(), "edit.jpg");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let upload = UploadConfig {
            jpeg_quality: Some(0),
            ..UploadConfig::default()
        };
        assert_eq!(upload.jpeg_quality(), MIN_JPEG_QUALITY);

        let display = DisplayConfig {
            grid_columns: Some(99),
        };
        assert_eq!(display.grid_columns(), MAX_GRID_COLUMNS);
    }

    #[test]
    fn save_if_missing_writes_once() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = Some(temp_dir.path().to_path_buf());
        let mut config = Config::default();

        assert!(save_if_missing_with_override(&config, base.clone()).expect("first save"));
        config.upload.app_id = "changed".to_string();
        assert!(!save_if_missing_with_override(&config, base.clone()).expect("second save"));

        let (loaded, _) = load_with_override(base);
        assert_eq!(loaded.upload.app_id, DEFAULT_APP_ID);
    }
}
