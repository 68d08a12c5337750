//! Plugin settings: platform origin and local project directory.

mod shared;

pub use shared::SharedSettings;

use crate::error::settings::SettingsError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const SETTINGS_FILE_NAME: &str = "settings.json";
const SETTINGS_DIR_NAME: &str = "orion";
const SETTINGS_VERSION: u32 = 1;
const DEFAULT_ARTEMIS_URL: &str = "https://artemis.cit.tum.de";
const DEFAULT_PROJECT_DIR_NAME: &str = "ArtemisProjects";

/// Overrides `artemis_url` when set (a `.env` file is honored).
pub const ARTEMIS_URL_ENV: &str = "ORION_ARTEMIS_URL";

/// Keys readable through a [`SettingsStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Origin of the platform, e.g. `https://artemis.cit.tum.de`.
    ArtemisUrl,
    /// Directory exercise checkouts are placed in.
    ProjectBaseDir,
}

/// Read access to plugin settings.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: SettingKey) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrionSettings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_artemis_url")]
    pub artemis_url: String,

    #[serde(default = "default_project_base_dir")]
    pub project_base_dir: String,
}

impl Default for OrionSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            artemis_url: default_artemis_url(),
            project_base_dir: default_project_base_dir(),
        }
    }
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}
fn default_artemis_url() -> String {
    DEFAULT_ARTEMIS_URL.to_string()
}
fn default_project_base_dir() -> String {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_PROJECT_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_DIR_NAME))
        .display()
        .to_string()
}

/// Per-user settings directory, `<config dir>/orion`.
pub fn default_settings_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME))
}

impl OrionSettings {
    /// Load settings from `{settings_dir}/settings.json`.
    ///
    /// A missing file yields defaults. `ORION_ARTEMIS_URL` replaces the
    /// stored origin before validation.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file exists but cannot be read or
    /// parsed, or the resulting settings are invalid.
    pub fn load(settings_dir: &Path) -> Result<Self, SettingsError> {
        let settings_path = settings_dir.join(SETTINGS_FILE_NAME);

        let settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                warn!("Failed to read settings file: {}", e);
                SettingsError::Read {
                    location: ErrorLocation::from(Location::caller()),
                    path: settings_path.clone(),
                    source: e,
                }
            })?;

            serde_json::from_str::<OrionSettings>(&contents).map_err(|e| {
                warn!("Failed to parse settings JSON: {}", e);
                SettingsError::Parse {
                    location: ErrorLocation::from(Location::caller()),
                    path: settings_path.clone(),
                    reason: e.to_string(),
                }
            })?
        } else {
            info!(
                "Settings file not found at {}, using defaults",
                settings_path.display()
            );
            Self::default()
        };

        let settings = settings.with_env_overrides();
        settings.validate()?;

        info!("Settings loaded from {}", settings_dir.display());
        Ok(settings)
    }

    /// Save settings to `{settings_dir}/settings.json` via temp file + rename.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if validation, serialization, the write or the
    /// rename fails.
    pub fn save(&self, settings_dir: &Path) -> Result<(), SettingsError> {
        self.validate()?;

        std::fs::create_dir_all(settings_dir).map_err(|e| SettingsError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: settings_dir.to_path_buf(),
            source: e,
        })?;

        let settings_path = settings_dir.join(SETTINGS_FILE_NAME);
        let temp_path = settings_dir.join(format!("{SETTINGS_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Serialize {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| SettingsError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &settings_path).map_err(|e| SettingsError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: settings_path.clone(),
            source: e,
        })?;

        info!("Settings saved to {}", settings_path.display());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Validation`] for an unsupported version, an
    /// origin that is not an absolute http(s) URL, or an empty base directory.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.version == 0 || self.version > SETTINGS_VERSION {
            return Err(SettingsError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, SETTINGS_VERSION
                ),
            });
        }

        let origin = Url::parse(&self.artemis_url).map_err(|e| SettingsError::Validation {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid Artemis URL '{}': {e}", self.artemis_url),
        })?;

        if !matches!(origin.scheme(), "http" | "https") {
            return Err(SettingsError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Artemis URL must use http or https: {}", self.artemis_url),
            });
        }

        if self.project_base_dir.trim().is_empty() {
            return Err(SettingsError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: "project_base_dir cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::ArtemisUrl => &self.artemis_url,
            SettingKey::ProjectBaseDir => &self.project_base_dir,
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = dotenvy::var(ARTEMIS_URL_ENV) {
            info!("Using Artemis URL from {ARTEMIS_URL_ENV}: {url}");
            self.artemis_url = url;
        }
        self
    }
}
