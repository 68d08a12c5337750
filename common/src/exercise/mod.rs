//! Exercise metadata as seen by the bridge.

pub mod builder;

use serde::{Deserialize, Serialize};

/// Identifiers of the remote exercise bound to the open project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseInfo {
    pub course_id: i64,
    pub exercise_id: i64,
    pub template_participation_id: Option<i64>,
    pub title: String,
}

/// Which repository of a programming exercise is selected in the IDE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryType {
    Template,
    Solution,
    Test,
}

/// The mode a project was opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseView {
    #[default]
    Student,
    Instructor,
}
