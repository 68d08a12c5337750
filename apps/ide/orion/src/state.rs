use crate::error::OrionError;
use crate::session::ProjectSession;

use common::ErrorLocation;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use log::{info, warn};
use tokio::sync::{Mutex, RwLock, mpsc, oneshot};

const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Commands that mutate the session registry.
pub enum StateCommand {
    /// Register a session under its project name
    Register(ProjectSession),

    /// Forget the session of a closed project
    Remove(String),
}

type QueuedCommand = (StateCommand, oneshot::Sender<()>);

/// Open project sessions, keyed by project name.
///
/// Mutations are serialized through an actor task; reads go straight to the
/// shared map. [`update`](PluginState::update) returns once the actor has
/// applied the command.
#[derive(Clone, Default)]
pub struct PluginState {
    command_tx: Arc<Mutex<Option<mpsc::Sender<QueuedCommand>>>>,
    sessions: Arc<RwLock<HashMap<String, ProjectSession>>>,
}

impl PluginState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `command` and wait for it to take effect.
    ///
    /// # Errors
    ///
    /// Returns [`OrionError::State`] if the actor task is gone.
    pub async fn update(&self, command: StateCommand) -> Result<(), OrionError> {
        let tx = self.ensure_actor().await;
        let (done_tx, done_rx) = oneshot::channel();

        tx.send((command, done_tx))
            .await
            .map_err(|e| state_error(format!("State actor stopped: {e}")))?;
        done_rx
            .await
            .map_err(|e| state_error(format!("State actor dropped command: {e}")))
    }

    pub async fn session(&self, project: &str) -> Option<ProjectSession> {
        self.sessions.read().await.get(project).cloned()
    }

    pub async fn project_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Sender of the actor, spawning it on first use.
    async fn ensure_actor(&self) -> mpsc::Sender<QueuedCommand> {
        let mut tx_guard = self.command_tx.lock().await;
        if let Some(tx) = tx_guard.as_ref() {
            return tx.clone();
        }

        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        *tx_guard = Some(tx.clone());
        tokio::spawn(state_actor(rx, Arc::clone(&self.sessions)));
        info!("Session registry actor spawned");
        tx
    }
}

#[track_caller]
fn state_error(message: String) -> OrionError {
    OrionError::State {
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}

async fn state_actor(
    mut command_rx: mpsc::Receiver<QueuedCommand>,
    sessions: Arc<RwLock<HashMap<String, ProjectSession>>>,
) {
    while let Some((command, done)) = command_rx.recv().await {
        match command {
            StateCommand::Register(session) => {
                let name = session.name().to_string();
                if sessions.write().await.insert(name.clone(), session).is_some() {
                    warn!("Replaced existing session for project '{name}'");
                } else {
                    info!("Registered session for project '{name}'");
                }
            }
            StateCommand::Remove(name) => {
                if sessions.write().await.remove(&name).is_some() {
                    info!("Removed session for project '{name}'");
                } else {
                    warn!("Close requested for unknown project '{name}'");
                }
            }
        }
        // Receiver gone means the caller stopped waiting.
        let _ = done.send(());
    }

    warn!("Session registry actor stopped");
}
