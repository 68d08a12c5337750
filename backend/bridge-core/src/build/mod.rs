//! Build lifecycle orchestration.
//!
//! The platform pushes build lifecycle events into the page; the page forwards
//! them over the bridge and this module turns them into calls on the IDE-side
//! collaborators: change submission, run configurations and the result view.

mod build_logs;
pub mod collaborators;
pub mod executor;
mod orchestrator;

pub use build_logs::parse_build_logs;
pub use collaborators::{
    BuildCollaborators, BuildRunner, RepositorySelection, ResultParser, RunConfigurationLauncher,
    SubmissionService,
};
pub use executor::{BackgroundExecutor, BackgroundTask, TokioExecutor};
pub use orchestrator::{BuildCycleState, BuildOrchestrator};
