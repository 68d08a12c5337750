use crate::{ExerciseInfoBuilder, ModelError};

fn complete_builder() -> ExerciseInfoBuilder {
    ExerciseInfoBuilder::default()
        .with_course_id(3)
        .with_exercise_id(7)
        .with_title("Sorting Algorithms")
}

/// **VALUE**: Verifies that a fully specified builder produces the expected info.
///
/// **WHY THIS MATTERS**: The routing resolver formats ids straight into URLs.
#[test]
fn given_complete_builder_when_built_then_returns_exercise_info() {
    // GIVEN: All fields set
    let builder = complete_builder().with_template_participation_id(9);

    // WHEN: Building
    let info = builder.build().unwrap();

    // THEN: Every field is carried over
    assert_eq!(info.course_id, 3);
    assert_eq!(info.exercise_id, 7);
    assert_eq!(info.template_participation_id, Some(9));
    assert_eq!(info.title, "Sorting Algorithms");
}

#[test]
fn given_no_template_participation_when_built_then_field_is_none() {
    let info = complete_builder().build().unwrap();

    assert_eq!(info.template_participation_id, None);
}

/// **BUG THIS CATCHES**: Would catch a missing required-field check, which would
/// let a half-filled exercise reach URL formatting.
#[test]
fn given_missing_course_id_when_built_then_returns_validation_error() {
    let result = ExerciseInfoBuilder::default()
        .with_exercise_id(7)
        .with_title("Sorting")
        .build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => assert_eq!(message, "Course id is required"),
    }
}

#[test]
fn given_zero_exercise_id_when_built_then_returns_validation_error() {
    let result = complete_builder().with_exercise_id(0).build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert!(message.starts_with("Exercise id must be positive"));
        }
    }
}

#[test]
fn given_negative_template_participation_when_built_then_returns_validation_error() {
    let result = complete_builder().with_template_participation_id(-1).build();

    assert!(result.is_err());
}

#[test]
fn given_blank_title_when_built_then_returns_validation_error() {
    let result = complete_builder().with_title("   ").build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Exercise title cannot be empty");
        }
    }
}
