use crate::codec::{ArgumentReader, InboundQuery, Operation, encode};
use crate::error::protocol::ProtocolError;

/// A fully decoded bridge call with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    TriggerLocalBuild,
    BuildStarted { exercise_instructions: String },
    BuildFinished,
    BuildFailed { build_logs: String },
    TestResult {
        success: bool,
        test_name: String,
        message: String,
    },
}

impl BridgeCall {
    pub fn operation(&self) -> Operation {
        match self {
            BridgeCall::TriggerLocalBuild => Operation::TriggerLocalBuild,
            BridgeCall::BuildStarted { .. } => Operation::BuildStarted,
            BridgeCall::BuildFinished => Operation::BuildFinished,
            BridgeCall::BuildFailed { .. } => Operation::BuildFailed,
            BridgeCall::TestResult { .. } => Operation::TestResult,
        }
    }

    /// Read the arguments of a recognized query.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingArgument`] when a line-sized argument
    /// is absent. The trailing free-text argument is never missing; it is
    /// empty instead.
    #[track_caller]
    pub fn from_query(mut query: InboundQuery<'_>) -> Result<Self, ProtocolError> {
        let operation = query.operation();
        let arguments = query.arguments();

        let call = match operation {
            Operation::TriggerLocalBuild => BridgeCall::TriggerLocalBuild,
            Operation::BuildStarted => BridgeCall::BuildStarted {
                exercise_instructions: arguments.read_remaining().to_owned(),
            },
            Operation::BuildFinished => BridgeCall::BuildFinished,
            Operation::BuildFailed => BridgeCall::BuildFailed {
                build_logs: arguments.read_remaining().to_owned(),
            },
            Operation::TestResult => {
                let success = required_line(arguments, operation, "success")?;
                let test_name = required_line(arguments, operation, "testName")?;
                BridgeCall::TestResult {
                    success: parse_flag(success),
                    test_name: test_name.to_owned(),
                    message: arguments.read_remaining().to_owned(),
                }
            }
        };

        Ok(call)
    }

    /// Wire form of this call, as the page-side functions produce it.
    pub fn encode(&self) -> String {
        match self {
            BridgeCall::TriggerLocalBuild => encode(Operation::TriggerLocalBuild, &[]),
            BridgeCall::BuildStarted {
                exercise_instructions,
            } => encode(Operation::BuildStarted, &[exercise_instructions.as_str()]),
            BridgeCall::BuildFinished => encode(Operation::BuildFinished, &[]),
            BridgeCall::BuildFailed { build_logs } => {
                encode(Operation::BuildFailed, &[build_logs.as_str()])
            }
            BridgeCall::TestResult {
                success,
                test_name,
                message,
            } => encode(
                Operation::TestResult,
                &[
                    if *success { "true" } else { "false" },
                    test_name.as_str(),
                    message.as_str(),
                ],
            ),
        }
    }
}

#[track_caller]
fn required_line<'a>(
    arguments: &mut ArgumentReader<'a>,
    operation: Operation,
    argument: &'static str,
) -> Result<&'a str, ProtocolError> {
    arguments
        .read_line()
        .ok_or_else(|| ProtocolError::missing_argument(operation, argument))
}

/// JavaScript stringifies booleans as `true`/`false`; anything else is false.
fn parse_flag(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}
