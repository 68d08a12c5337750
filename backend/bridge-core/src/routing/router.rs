use crate::bridge::{BrowserNavigation, Notifier};
use crate::routing::ExerciseRegistry;
use crate::settings::{SettingKey, SettingsStore};

use std::sync::Arc;

use log::{debug, warn};

const EXERCISE_DETAIL_PATH: &str = "/#/courses/{course}/exercises/{exercise}";
const CODE_EDITOR_INSTRUCTOR_PATH: &str =
    "/#/course-management/{course}/programming-exercises/{exercise}/code-editor/ide/{participation}";
const NO_BROWSER_MESSAGE: &str = "Could not return to Artemis: no browser is open for this project";

/// Computes platform URLs for the open project.
#[derive(Clone)]
pub struct Router {
    registry: Arc<dyn ExerciseRegistry>,
    settings: Arc<dyn SettingsStore>,
}

impl Router {
    pub fn new(registry: Arc<dyn ExerciseRegistry>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { registry, settings }
    }

    /// Configured platform origin. Read on every call so settings changes
    /// apply to the next route.
    pub fn default_route(&self) -> String {
        self.settings.get(SettingKey::ArtemisUrl)
    }

    /// Deep link to the exercise bound to this project.
    ///
    /// Students land on the exercise details, instructors in the online code
    /// editor of the template participation. `None` if the project is not an
    /// exercise, its metadata is gone, or an instructor project has no
    /// template participation.
    pub fn route_for_current_exercise(&self) -> Option<String> {
        if !self.registry.is_bound_exercise() {
            return None;
        }

        let Some(info) = self.registry.exercise_info() else {
            debug!("Project is bound to an exercise but no exercise info is available");
            return None;
        };

        let path = if self.registry.is_instructor_view() {
            let Some(participation_id) = info.template_participation_id else {
                warn!(
                    "Instructor exercise {} has no template participation, no editor route",
                    info.exercise_id
                );
                return None;
            };
            CODE_EDITOR_INSTRUCTOR_PATH
                .replace("{course}", &info.course_id.to_string())
                .replace("{exercise}", &info.exercise_id.to_string())
                .replace("{participation}", &participation_id.to_string())
        } else {
            EXERCISE_DETAIL_PATH
                .replace("{course}", &info.course_id.to_string())
                .replace("{exercise}", &info.exercise_id.to_string())
        };

        Some(format!("{}{path}", self.default_route()))
    }

    /// Point the project's browser back at the platform.
    ///
    /// Loads the exercise route, or the platform origin if there is none. When
    /// the project has no browser the user is notified instead.
    pub fn return_to_platform(
        &self,
        navigation: Option<&dyn BrowserNavigation>,
        notifier: &dyn Notifier,
    ) {
        let Some(navigation) = navigation else {
            warn!("Return to platform requested without a browser");
            notifier.notify(NO_BROWSER_MESSAGE);
            return;
        };

        let route = self
            .route_for_current_exercise()
            .unwrap_or_else(|| self.default_route());
        debug!("Returning browser to {route}");
        navigation.load_url(&route);
    }
}
