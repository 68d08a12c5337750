use bridge_core::bridge::{BrowserNavigation, Notifier};
use bridge_core::routing::{ExerciseRegistry, Router, exercise_full_path};
use bridge_core::settings::{OrionSettings, SharedSettings};

use common::{ExerciseInfo, ExerciseInfoBuilder, ExerciseView};

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

struct BoundExercise {
    info: ExerciseInfo,
    instructor: bool,
}

impl ExerciseRegistry for BoundExercise {
    fn is_bound_exercise(&self) -> bool {
        true
    }

    fn exercise_info(&self) -> Option<ExerciseInfo> {
        Some(self.info.clone())
    }

    fn is_instructor_view(&self) -> bool {
        self.instructor
    }
}

#[derive(Default)]
struct RecordingNavigation {
    loaded: Mutex<Vec<String>>,
}

impl BrowserNavigation for RecordingNavigation {
    fn load_url(&self, url: &str) {
        self.loaded.lock().unwrap().push(url.to_string());
    }
}

struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, message: &str) {
        panic!("Unexpected notification: {message}");
    }
}

fn sorting_exercise() -> ExerciseInfo {
    ExerciseInfoBuilder::default()
        .with_course_id(3)
        .with_exercise_id(7)
        .with_template_participation_id(9)
        .with_title("Sorting Algorithms")
        .build()
        .expect("Valid exercise")
}

/// **VALUE**: Verifies routes follow a settings update made through the shared
/// settings handle, including the persisted copy.
///
/// **WHY THIS MATTERS**: The settings dialog and the router hold different
/// clones of the same settings. An update in one must reach the other.
#[test]
fn given_shared_settings_when_origin_updated_then_router_follows() {
    // GIVEN: A router over shared settings
    let dir = TempDir::new().expect("Temp dir");
    let shared = SharedSettings::new(
        dir.path().to_path_buf(),
        OrionSettings {
            artemis_url: String::from("https://artemis.example"),
            ..OrionSettings::default()
        },
    );
    let router = Router::new(
        Arc::new(BoundExercise {
            info: sorting_exercise(),
            instructor: true,
        }),
        Arc::new(shared.clone()),
    );

    // WHEN: The origin is updated and the user returns to the platform
    shared
        .update(OrionSettings {
            artemis_url: String::from("https://artemis.other.example"),
            ..OrionSettings::default()
        })
        .expect("Valid update");
    let navigation = RecordingNavigation::default();
    router.return_to_platform(Some(&navigation), &SilentNotifier);

    // THEN: The instructor editor on the new origin is loaded
    assert_eq!(
        *navigation.loaded.lock().unwrap(),
        vec![String::from(
            "https://artemis.other.example/#/course-management/3/programming-exercises/7/code-editor/ide/9"
        )]
    );
    assert!(dir.path().join("settings.json").exists());
}

#[test]
fn given_shared_settings_when_checkout_path_built_then_below_base_dir() {
    let dir = TempDir::new().expect("Temp dir");
    let base_dir = dir.path().join("projects");
    let shared = SharedSettings::new(
        dir.path().to_path_buf(),
        OrionSettings {
            project_base_dir: base_dir.display().to_string(),
            ..OrionSettings::default()
        },
    );

    let path = exercise_full_path(&shared, &sorting_exercise(), ExerciseView::Instructor);

    assert_eq!(path, base_dir.join("3-7-Sorting_Algorithms_instructor"));
}
