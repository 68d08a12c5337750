use crate::error::model_error::ModelError;
use crate::{ErrorLocation, ExerciseInfo};

use std::panic::Location;

/// Builder for creating validated ExerciseInfo instances.
#[derive(Debug, Default)]
pub struct ExerciseInfoBuilder {
    course_id: Option<i64>,
    exercise_id: Option<i64>,
    template_participation_id: Option<i64>,
    title: Option<String>,
}

impl ExerciseInfoBuilder {
    pub fn with_course_id(mut self, course_id: i64) -> Self {
        self.course_id = Some(course_id);
        self
    }

    pub fn with_exercise_id(mut self, exercise_id: i64) -> Self {
        self.exercise_id = Some(exercise_id);
        self
    }

    pub fn with_template_participation_id(mut self, participation_id: i64) -> Self {
        self.template_participation_id = Some(participation_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the ExerciseInfo with validation.
    #[track_caller]
    pub fn build(self) -> Result<ExerciseInfo, ModelError> {
        let course_id = self.course_id.ok_or_else(|| ModelError::Validation {
            message: String::from("Course id is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if course_id <= 0 {
            return Err(ModelError::Validation {
                message: format!("Course id must be positive, got {course_id}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let exercise_id = self.exercise_id.ok_or_else(|| ModelError::Validation {
            message: String::from("Exercise id is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if exercise_id <= 0 {
            return Err(ModelError::Validation {
                message: format!("Exercise id must be positive, got {exercise_id}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(participation_id) = self.template_participation_id {
            if participation_id <= 0 {
                return Err(ModelError::Validation {
                    message: format!(
                        "Template participation id must be positive, got {participation_id}"
                    ),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        let title = self.title.ok_or_else(|| ModelError::Validation {
            message: String::from("Exercise title is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if title.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Exercise title cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ExerciseInfo {
            course_id,
            exercise_id,
            template_participation_id: self.template_participation_id,
            title,
        })
    }
}
