use crate::TEMPLATE_SENTINEL;
use crate::build::build_logs::parse_build_logs;
use crate::build::collaborators::BuildCollaborators;
use crate::build::executor::BackgroundExecutor;
use crate::error::protocol::ProtocolError;

use common::RepositoryType;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use uuid::Uuid;

/// Where the orchestrator is in a platform-triggered build cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildCycleState {
    /// No cycle in flight and no result listener attached.
    Idle,
    /// Local changes are being pushed to the platform.
    Submitting,
    /// Submission succeeded; the run configuration is being launched.
    BuildRunning,
    /// The result parser is attached to a build.
    Attached,
}

/// Coordinates submission, build launch and result forwarding for one project.
///
/// Lifecycle events arrive on the browser's message thread. Anything that
/// blocks is handed to the executor; the rest is forwarded synchronously.
#[derive(Clone)]
pub struct BuildOrchestrator {
    inner: Arc<Inner>,
    executor: Arc<dyn BackgroundExecutor>,
}

struct Inner {
    collaborators: BuildCollaborators,

    /// Held for a whole check-submit-launch-attach sequence, so concurrent
    /// cycles on pool threads cannot both attach.
    cycle_guard: Mutex<()>,

    /// Phase of the cycle currently holding the guard.
    phase: Mutex<BuildCycleState>,
}

impl BuildOrchestrator {
    pub fn new(collaborators: BuildCollaborators, executor: Arc<dyn BackgroundExecutor>) -> Self {
        Self {
            inner: Arc::new(Inner {
                collaborators,
                cycle_guard: Mutex::new(()),
                phase: Mutex::new(BuildCycleState::Idle),
            }),
            executor,
        }
    }

    /// Current cycle state. Attachment is read from the result parser.
    pub fn state(&self) -> BuildCycleState {
        let phase = *lock(&self.inner.phase);
        match phase {
            BuildCycleState::Idle if self.inner.collaborators.result_parser.is_attached() => {
                BuildCycleState::Attached
            }
            phase => phase,
        }
    }

    /// Start a local build and test run in the background.
    pub fn trigger_local_build(&self) {
        info!("Local build requested by the page");
        let build_runner = Arc::clone(&self.inner.collaborators.build_runner);
        self.executor
            .execute(Box::new(move || build_runner.run_local_build_and_test()));
    }

    /// React to the platform reporting that a build started.
    ///
    /// The `TEMPLATE` sentinel only selects the template repository. Any other
    /// payload schedules a submit-then-launch cycle in the background; the
    /// cycle is skipped when a result listener is already attached.
    pub fn on_build_started(&self, exercise_instructions: String) {
        if exercise_instructions == TEMPLATE_SENTINEL {
            debug!("Template sentinel received, selecting template repository");
            self.inner
                .collaborators
                .repository_selection
                .select_repository(RepositoryType::Template);
            return;
        }

        let cycle_id = Uuid::new_v4();
        debug!("Scheduling build cycle {cycle_id}");

        let inner = Arc::clone(&self.inner);
        self.executor.execute(Box::new(move || {
            inner.run_build_cycle(cycle_id, &exercise_instructions)
        }));
    }

    pub fn on_build_finished(&self) {
        debug!("Build finished, notifying result parser");
        self.inner.collaborators.result_parser.on_finished();
    }

    /// Decode the failure payload and hand the compile errors to the parser.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedPayload`] if the payload does not have
    /// the `{"error": {"<file>": [...]}}` shape. Nothing is forwarded then.
    pub fn on_build_failed(&self, build_logs: &str) -> Result<(), ProtocolError> {
        let errors = parse_build_logs(build_logs)?;
        info!("Build failed with compile errors in {} file(s)", errors.len());
        self.inner
            .collaborators
            .result_parser
            .on_compile_errors(errors);
        Ok(())
    }

    pub fn on_test_result(&self, success: bool, test_name: &str, message: &str) {
        debug!("Test result for '{test_name}': success={success}");
        self.inner
            .collaborators
            .result_parser
            .on_test_result(success, test_name, message);
    }
}

impl Inner {
    fn run_build_cycle(&self, cycle_id: Uuid, exercise_instructions: &str) {
        let _cycle = lock(&self.cycle_guard);
        let parser = &self.collaborators.result_parser;

        if parser.is_attached() {
            debug!("Build cycle {cycle_id} ignored: result parser already attached");
            return;
        }

        self.set_phase(BuildCycleState::Submitting);
        if !self.collaborators.submission.submit_changes() {
            warn!("Build cycle {cycle_id} aborted: submitting changes failed");
            self.set_phase(BuildCycleState::Idle);
            return;
        }

        self.set_phase(BuildCycleState::BuildRunning);
        if parser.is_attached() {
            debug!("Build cycle {cycle_id} ignored: result parser attached during submission");
            self.set_phase(BuildCycleState::Idle);
            return;
        }

        self.collaborators.launcher.launch(true);
        parser.attach(exercise_instructions);
        // From here on the parser owns the attachment.
        self.set_phase(BuildCycleState::Idle);

        info!("Build cycle {cycle_id} attached to server-triggered run");
    }

    fn set_phase(&self, phase: BuildCycleState) {
        *lock(&self.phase) = phase;
    }
}

/// A panicking collaborator must not wedge every later build cycle.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
