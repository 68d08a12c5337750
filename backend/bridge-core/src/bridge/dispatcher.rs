use crate::build::BuildOrchestrator;
use crate::codec::{self, BridgeCall};
use crate::error::BridgeError;
use crate::error::protocol::ProtocolError;

use log::{debug, error};

/// Outcome of offering a query to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The query named one of our operations and was routed.
    Handled,
    /// Not one of our operations; another handler may take it.
    Declined,
}

impl Dispatch {
    pub fn is_handled(self) -> bool {
        matches!(self, Dispatch::Handled)
    }
}

/// Routes decoded page queries to the build orchestrator.
#[derive(Clone)]
pub struct QueryDispatcher {
    orchestrator: BuildOrchestrator,
}

impl QueryDispatcher {
    pub fn new(orchestrator: BuildOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Entry point for the browser's query channel.
    ///
    /// Returns `false` only for queries that are not ours. A recognized query
    /// with a bad payload is logged and dropped, but still counts as handled.
    pub fn on_inbound_query(&self, raw: &str) -> bool {
        match self.dispatch(raw) {
            Ok(dispatch) => dispatch.is_handled(),
            Err(e) => {
                error!("Dropping bridge query: {e}");
                true
            }
        }
    }

    /// Decode and route one raw query.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Protocol`] when a recognized operation has
    /// missing or malformed arguments.
    pub fn dispatch(&self, raw: &str) -> Result<Dispatch, BridgeError> {
        let Some(query) = codec::decode(raw) else {
            debug!("Declining query with unknown operation");
            return Ok(Dispatch::Declined);
        };

        let call = BridgeCall::from_query(query)?;
        debug!("Dispatching {}", call.operation());
        self.route(call)?;

        Ok(Dispatch::Handled)
    }

    fn route(&self, call: BridgeCall) -> Result<(), ProtocolError> {
        match call {
            BridgeCall::TriggerLocalBuild => self.orchestrator.trigger_local_build(),
            BridgeCall::BuildStarted {
                exercise_instructions,
            } => self.orchestrator.on_build_started(exercise_instructions),
            BridgeCall::BuildFinished => self.orchestrator.on_build_finished(),
            BridgeCall::BuildFailed { build_logs } => {
                self.orchestrator.on_build_failed(&build_logs)?
            }
            BridgeCall::TestResult {
                success,
                test_name,
                message,
            } => self
                .orchestrator
                .on_test_result(success, &test_name, &message),
        }
        Ok(())
    }
}
