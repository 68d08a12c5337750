//! Offloading of blocking work away from the browser's message thread.
//!
//! Submitting changes and running builds block for seconds. Doing that on the
//! thread that delivers browser queries hangs the embedded browser, so those
//! steps are always handed to a [`BackgroundExecutor`].

use log::trace;
use tokio::runtime::Handle;

pub type BackgroundTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks somewhere other than the calling thread.
pub trait BackgroundExecutor: Send + Sync {
    /// Schedule `task` and return without waiting for it.
    fn execute(&self, task: BackgroundTask);
}

/// Executor backed by the blocking thread pool of a tokio runtime.
#[derive(Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Executor for the runtime the caller is running in, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl BackgroundExecutor for TokioExecutor {
    fn execute(&self, task: BackgroundTask) {
        trace!("Scheduling background task on blocking pool");
        // Detached: completion is reported by the collaborators themselves.
        drop(self.handle.spawn_blocking(task));
    }
}
