use crate::codec::Operation;
use crate::error::protocol::ProtocolError;

use common::{BuildError, BuildLogFileErrors};

use serde::Deserialize;
use serde_json::Map;

/// Payload of a `BuildFailed` event: `{"error": {"<file>": [record, ...]}}`.
#[derive(Debug, Deserialize)]
struct BuildLogsPayload {
    error: Map<String, serde_json::Value>,
}

/// Decode a `BuildFailed` payload into per-file error lists.
///
/// Entries come out in the iteration order of the decoded map, which is
/// deterministic for a given payload but not meaningful beyond that.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedPayload`] if the payload is not JSON, has
/// no `error` object, or any file maps to something other than an array of
/// objects.
#[track_caller]
pub fn parse_build_logs(payload: &str) -> Result<Vec<BuildLogFileErrors>, ProtocolError> {
    let logs: BuildLogsPayload = serde_json::from_str(payload).map_err(|e| {
        ProtocolError::malformed_payload(Operation::BuildFailed, format!("invalid build logs: {e}"))
    })?;

    let mut entries = Vec::with_capacity(logs.error.len());
    for (file_path, errors) in logs.error {
        let errors: Vec<BuildError> = serde_json::from_value(errors).map_err(|e| {
            ProtocolError::malformed_payload(
                Operation::BuildFailed,
                format!("invalid errors for '{file_path}': {e}"),
            )
        })?;
        entries.push(BuildLogFileErrors::new(file_path, errors));
    }

    Ok(entries)
}
