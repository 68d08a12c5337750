//! Deep links from the IDE into the platform's web UI.

mod exercise_paths;
mod router;

pub use exercise_paths::{exercise_directory, exercise_full_path};
pub use router::Router;

use common::ExerciseInfo;

/// Registry of the exercise bound to the open project.
pub trait ExerciseRegistry: Send + Sync {
    /// Whether the open project was checked out from the platform.
    fn is_bound_exercise(&self) -> bool;

    fn exercise_info(&self) -> Option<ExerciseInfo>;

    fn is_instructor_view(&self) -> bool;
}
