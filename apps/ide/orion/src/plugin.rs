use crate::error::OrionError;
use crate::logger::initialize as logger_initialize;
use crate::session::{ProjectServices, ProjectSession};
use crate::state::{PluginState, StateCommand};

use bridge_core::build::TokioExecutor;
use bridge_core::settings::{SharedSettings, default_settings_dir};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use tokio::runtime::Handle;

const LOG_DIR_NAME: &str = "logs";

/// Directories the plugin reads settings from and writes logs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPaths {
    pub settings_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PluginPaths {
    /// Both directories below `root`, logs in `root/logs`.
    pub fn under(root: PathBuf) -> Self {
        Self {
            log_dir: root.join(LOG_DIR_NAME),
            settings_dir: root,
        }
    }

    /// Per-user defaults below the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`OrionError::Orion`] if the platform has no config directory.
    #[track_caller]
    pub fn user_default() -> Result<Self, OrionError> {
        default_settings_dir()
            .map(Self::under)
            .ok_or_else(|| OrionError::Orion {
                message: String::from("No user config directory on this platform"),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Process-wide plugin: settings, executor and the open project sessions.
#[derive(Clone)]
pub struct OrionPlugin {
    settings: SharedSettings,
    executor: TokioExecutor,
    state: PluginState,
}

impl OrionPlugin {
    /// Create the directories, start logging and load settings.
    ///
    /// Blocking bridge work runs on the blocking pool of `runtime`.
    ///
    /// # Errors
    ///
    /// Returns [`OrionError::Orion`] if a directory or the logger cannot be
    /// set up, and [`OrionError::Settings`] if stored settings are unusable.
    pub fn initialize(paths: &PluginPaths, runtime: Handle) -> Result<Self, OrionError> {
        create_dir_all(&paths.log_dir).map_err(|e| OrionError::Orion {
            message: format!("Failed to create log directory: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        logger_initialize(&paths.log_dir)?;

        info!("Orion plugin starting");
        info!("Settings directory: {}", paths.settings_dir.display());

        let settings =
            SharedSettings::load(&paths.settings_dir).map_err(|e| OrionError::Settings {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            settings,
            executor: TokioExecutor::new(runtime),
            state: PluginState::new(),
        })
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Open a session for `project`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`OrionError::State`] if the session registry is gone.
    pub async fn open_project(
        &self,
        project: &str,
        services: ProjectServices,
    ) -> Result<ProjectSession, OrionError> {
        let session = ProjectSession::open(
            project,
            services,
            self.settings.clone(),
            Arc::new(self.executor.clone()),
        );
        self.state
            .update(StateCommand::Register(session.clone()))
            .await?;
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns [`OrionError::Session`] if `project` has no open session.
    pub async fn close_project(&self, project: &str) -> Result<(), OrionError> {
        if self.state.session(project).await.is_none() {
            return Err(OrionError::Session {
                message: format!("No open session for project '{project}'"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.state
            .update(StateCommand::Remove(project.to_string()))
            .await
    }

    pub async fn session(&self, project: &str) -> Option<ProjectSession> {
        self.state.session(project).await
    }

    pub async fn open_projects(&self) -> Vec<String> {
        self.state.project_names().await
    }
}
