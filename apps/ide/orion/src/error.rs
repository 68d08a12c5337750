use common::ErrorLocation;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to the IDE adapter.
///
/// Serializable so the adapter can forward them across its own boundary,
/// with the capture location kept for the log.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OrionError {
    /// Error from plugin startup (directories, logger)
    #[error("Orion Error: {message} {location}")]
    Orion {
        message: String,
        location: ErrorLocation,
    },

    /// Settings could not be loaded or stored
    #[error("Settings Error: {message} {location}")]
    Settings {
        message: String,
        location: ErrorLocation,
    },

    /// A project session could not be opened or found
    #[error("Session Error: {message} {location}")]
    Session {
        message: String,
        location: ErrorLocation,
    },

    /// The session registry stopped processing commands
    #[error("State Error: {message} {location}")]
    State {
        message: String,
        location: ErrorLocation,
    },
}
