//! IDE-side services the orchestrator drives.
//!
//! Implementations are owned by the host and shared per open project. All
//! methods take `&self`; implementors keep their own interior state.

use common::{BuildLogFileErrors, RepositoryType};

use std::sync::Arc;

/// Pushes local changes to the platform's version control.
pub trait SubmissionService: Send + Sync {
    /// Blocks until the submission finished. `false` means nothing was pushed
    /// and the service already told the user why.
    fn submit_changes(&self) -> bool;
}

/// Runs the exercise build and tests on the local machine.
pub trait BuildRunner: Send + Sync {
    fn run_local_build_and_test(&self);
}

/// Creates and starts a tracked build/test run configuration.
pub trait RunConfigurationLauncher: Send + Sync {
    /// `server_triggered` is true when the run mirrors a build started by the
    /// platform rather than one the user started in the IDE.
    fn launch(&self, server_triggered: bool);
}

/// Renders build and test outcomes and owns the "attached" flag.
pub trait ResultParser: Send + Sync {
    fn is_attached(&self) -> bool;

    /// Attach to the running build; `instructions` seed the expected test tree.
    fn attach(&self, instructions: &str);

    fn on_finished(&self);

    fn on_compile_errors(&self, errors: Vec<BuildLogFileErrors>);

    fn on_test_result(&self, success: bool, test_name: &str, message: &str);
}

/// Project state holding which exercise repository is selected.
pub trait RepositorySelection: Send + Sync {
    fn select_repository(&self, repository: RepositoryType);
}

/// The collaborators of one project's build orchestrator.
#[derive(Clone)]
pub struct BuildCollaborators {
    pub submission: Arc<dyn SubmissionService>,
    pub build_runner: Arc<dyn BuildRunner>,
    pub launcher: Arc<dyn RunConfigurationLauncher>,
    pub result_parser: Arc<dyn ResultParser>,
    pub repository_selection: Arc<dyn RepositorySelection>,
}
