//! Errors raised while decoding a recognized bridge query.
//!
//! An unknown operation name is not an error; the dispatcher declines it so
//! other handlers on the same channel can claim it.

use crate::codec::Operation;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProtocolError {
    #[error("Missing Argument Error: {operation} requires '{argument}' {location}")]
    MissingArgument {
        operation: Operation,
        argument: &'static str,
        location: ErrorLocation,
    },

    #[error("Malformed Payload Error: {operation}: {message} {location}")]
    MalformedPayload {
        operation: Operation,
        message: String,
        location: ErrorLocation,
    },
}

impl ProtocolError {
    #[track_caller]
    pub fn missing_argument(operation: Operation, argument: &'static str) -> Self {
        ProtocolError::MissingArgument {
            operation,
            argument,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed_payload(operation: Operation, message: impl Into<String>) -> Self {
        ProtocolError::MalformedPayload {
            operation,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ProtocolError::MissingArgument { operation, .. } => *operation,
            ProtocolError::MalformedPayload { operation, .. } => *operation,
        }
    }
}
