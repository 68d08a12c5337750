//! Line-delimited message codec shared by the page and native sides.
//!
//! The page-to-native channel carries a single string per call, so a query is
//! the operation name on the first line followed by one line per positional
//! argument. The last argument is free text (instructions, JSON build logs,
//! test output) and takes everything after the preceding newline.

mod call;

pub use call::BridgeCall;

use std::fmt::{Display, Formatter, Result as FormatResult};

pub const LINE_SEPARATOR: char = '\n';

/// The closed set of operations the page may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    TriggerLocalBuild,
    BuildStarted,
    BuildFinished,
    BuildFailed,
    TestResult,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::TriggerLocalBuild,
        Operation::BuildStarted,
        Operation::BuildFinished,
        Operation::BuildFailed,
        Operation::TestResult,
    ];

    /// Wire and JavaScript name of the operation.
    pub const fn name(self) -> &'static str {
        match self {
            Operation::TriggerLocalBuild => "TriggerLocalBuild",
            Operation::BuildStarted => "BuildStarted",
            Operation::BuildFinished => "BuildFinished",
            Operation::BuildFailed => "BuildFailed",
            Operation::TestResult => "TestResult",
        }
    }

    /// Positional parameter names, in wire order.
    pub const fn parameters(self) -> &'static [&'static str] {
        match self {
            Operation::TriggerLocalBuild => &[],
            Operation::BuildStarted => &["exerciseInstructions"],
            Operation::BuildFinished => &[],
            Operation::BuildFailed => &["buildLogsJsonString"],
            Operation::TestResult => &["success", "testName", "message"],
        }
    }

    /// Case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.name() == name)
    }
}

impl Display for Operation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.name())
    }
}

/// Encode an operation and its arguments into a single query string.
///
/// Arguments are joined with newlines; the final one is written verbatim and
/// may itself contain newlines.
pub fn encode(operation: Operation, arguments: &[&str]) -> String {
    let capacity = operation.name().len()
        + arguments
            .iter()
            .map(|argument| argument.len() + 1)
            .sum::<usize>();

    let mut encoded = String::with_capacity(capacity);
    encoded.push_str(operation.name());
    for argument in arguments {
        encoded.push(LINE_SEPARATOR);
        encoded.push_str(argument);
    }
    encoded
}

/// Decode the operation name of a raw query.
///
/// Returns `None` when the first line is not a known operation; the caller
/// should treat that as "not mine" rather than as a failure.
pub fn decode(raw: &str) -> Option<InboundQuery<'_>> {
    let mut arguments = ArgumentReader::new(raw);
    let operation = Operation::from_name(arguments.read_line()?)?;
    Some(InboundQuery {
        operation,
        arguments,
    })
}

/// A recognized query whose arguments have not been read yet.
#[derive(Debug)]
pub struct InboundQuery<'a> {
    operation: Operation,
    arguments: ArgumentReader<'a>,
}

impl<'a> InboundQuery<'a> {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn arguments(&mut self) -> &mut ArgumentReader<'a> {
        &mut self.arguments
    }
}

/// Cursor over the argument section of a query.
#[derive(Debug, Clone)]
pub struct ArgumentReader<'a> {
    rest: Option<&'a str>,
}

impl<'a> ArgumentReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: Some(text) }
    }

    /// Next line without its terminator, or `None` once the text is used up.
    pub fn read_line(&mut self) -> Option<&'a str> {
        let rest = self.rest.filter(|rest| !rest.is_empty())?;

        let line = match rest.split_once(LINE_SEPARATOR) {
            Some((line, tail)) => {
                self.rest = Some(tail);
                line
            }
            None => {
                self.rest = None;
                rest
            }
        };

        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Everything not read so far, embedded newlines included.
    pub fn read_remaining(&mut self) -> &'a str {
        self.rest.take().unwrap_or_default()
    }
}
