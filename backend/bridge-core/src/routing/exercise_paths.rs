use crate::settings::{SettingKey, SettingsStore};

use common::{ExerciseInfo, ExerciseView};

use std::path::PathBuf;

const INSTRUCTOR_SUFFIX: &str = "_instructor";

/// Local directory name of an exercise checkout:
/// `{course}-{exercise}-{title}` with spaces in the title replaced by
/// underscores, suffixed with `_instructor` for instructor checkouts.
pub fn exercise_directory(
    course_id: i64,
    exercise_id: i64,
    title: &str,
    view: ExerciseView,
) -> String {
    let suffix = match view {
        ExerciseView::Instructor => INSTRUCTOR_SUFFIX,
        ExerciseView::Student => "",
    };
    format!(
        "{course_id}-{exercise_id}-{title}{suffix}",
        title = title.replace(' ', "_")
    )
}

/// Absolute checkout location below the configured project base directory.
pub fn exercise_full_path(
    settings: &dyn SettingsStore,
    exercise: &ExerciseInfo,
    view: ExerciseView,
) -> PathBuf {
    PathBuf::from(settings.get(SettingKey::ProjectBaseDir)).join(exercise_directory(
        exercise.course_id,
        exercise.exercise_id,
        &exercise.title,
        view,
    ))
}
