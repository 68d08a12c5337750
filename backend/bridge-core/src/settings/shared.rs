use crate::error::settings::SettingsError;
use crate::settings::{OrionSettings, SettingKey, SettingsStore};

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use log::{error, info};

/// Settings shared by every consumer of one IDE session.
///
/// Reads go through [`SettingsStore::get`] each time, so an [`update`]
/// is visible to the very next read.
///
/// [`update`]: SharedSettings::update
#[derive(Clone)]
pub struct SharedSettings {
    settings: Arc<RwLock<OrionSettings>>,
    settings_dir: Arc<PathBuf>,
}

impl SharedSettings {
    pub fn new(settings_dir: PathBuf, settings: OrionSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            settings_dir: Arc::new(settings_dir),
        }
    }

    /// Load settings from `settings_dir` and share them.
    ///
    /// # Errors
    ///
    /// See [`OrionSettings::load`].
    pub fn load(settings_dir: &Path) -> Result<Self, SettingsError> {
        let settings = OrionSettings::load(settings_dir)?;
        Ok(Self::new(settings_dir.to_path_buf(), settings))
    }

    pub fn current(&self) -> OrionSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate, swap in memory, then persist.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Validation`] without touching anything if the
    /// new settings are invalid. A failed write is returned as well, but the
    /// in-memory settings are already updated by then.
    pub fn update(&self, new_settings: OrionSettings) -> Result<(), SettingsError> {
        new_settings.validate()?;

        {
            let mut settings = self
                .settings
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *settings = new_settings.clone();
        }
        info!("Settings updated in memory");

        new_settings.save(&self.settings_dir).inspect_err(|e| {
            error!("Settings updated in memory but disk write failed: {}", e);
        })
    }
}

impl SettingsStore for SharedSettings {
    fn get(&self, key: SettingKey) -> String {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .to_string()
    }
}
