mod builder;

use crate::{ExerciseView, RepositoryType};

#[test]
fn given_repository_type_when_serialized_then_uses_platform_spelling() {
    let json = serde_json::to_string(&RepositoryType::Template).unwrap();

    assert_eq!(json, "\"TEMPLATE\"");
}

#[test]
fn given_default_view_when_created_then_is_student() {
    assert_eq!(ExerciseView::default(), ExerciseView::Student);
}
