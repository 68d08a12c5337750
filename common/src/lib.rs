//! Shared data model for the Orion build bridge.
//!
//! This crate holds the plain data passed between the bridge layers:
//! error locations, decoded build errors, and exercise metadata.
//! Nothing in here talks to the browser or the IDE.
//!
//! ## Architecture
//!
//! - **common** (this crate): Data structures
//! - **bridge-core**: Codec, dispatcher, orchestrator and routing
//! - **orion**: Host wiring (logging, per-project session)

pub mod build_error;
pub mod error;
pub mod exercise;

pub use build_error::{BuildError, BuildLogFileErrors};
pub use error::error_location::ErrorLocation;
pub use error::model_error::ModelError;
pub use exercise::builder::ExerciseInfoBuilder;
pub use exercise::{ExerciseInfo, ExerciseView, RepositoryType};

#[cfg(test)]
mod tests;
