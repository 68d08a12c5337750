//! Build errors reported by the platform when a submission fails to compile.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const LINE_FIELD: &str = "line";
const COLUMN_FIELD: &str = "column";
const MESSAGE_FIELD: &str = "message";

/// A single structured error record for one source file.
///
/// The platform owns the record layout, so the record is kept as the JSON
/// object it arrived as. Only the file grouping is interpreted by the bridge;
/// the accessors below read the conventional fields when they are present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildError {
    fields: Map<String, Value>,
}

impl BuildError {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn line(&self) -> Option<u64> {
        self.fields.get(LINE_FIELD).and_then(Value::as_u64)
    }

    pub fn column(&self) -> Option<u64> {
        self.fields.get(COLUMN_FIELD).and_then(Value::as_u64)
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get(MESSAGE_FIELD).and_then(Value::as_str)
    }
}

/// All build errors reported for one file, in the order the platform sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildLogFileErrors {
    pub file_path: String,
    pub errors: Vec<BuildError>,
}

impl BuildLogFileErrors {
    pub fn new(file_path: impl Into<String>, errors: Vec<BuildError>) -> Self {
        Self {
            file_path: file_path.into(),
            errors,
        }
    }
}
