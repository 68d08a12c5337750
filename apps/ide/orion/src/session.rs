use bridge_core::bridge::{BrowserHost, BrowserNavigation, BuildConnector, Notifier, QueryInjector};
use bridge_core::build::{BackgroundExecutor, BuildCollaborators};
use bridge_core::routing::{ExerciseRegistry, Router, exercise_full_path};
use bridge_core::settings::SharedSettings;

use common::ExerciseView;

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};

/// IDE-side implementations one project brings to its session.
#[derive(Clone)]
pub struct ProjectServices {
    pub collaborators: BuildCollaborators,
    pub registry: Arc<dyn ExerciseRegistry>,
}

/// The build bridge and router of one open project.
///
/// Every project window gets its own session; sessions share only the
/// plugin settings and the background executor.
#[derive(Clone)]
pub struct ProjectSession {
    name: Arc<str>,
    connector: BuildConnector,
    router: Router,
    registry: Arc<dyn ExerciseRegistry>,
    settings: SharedSettings,
}

impl ProjectSession {
    pub fn open(
        name: &str,
        services: ProjectServices,
        settings: SharedSettings,
        executor: Arc<dyn BackgroundExecutor>,
    ) -> Self {
        let connector = BuildConnector::new(services.collaborators, executor);
        let router = Router::new(
            Arc::clone(&services.registry),
            Arc::new(settings.clone()),
        );

        info!("Opened session for project '{name}'");
        Self {
            name: Arc::from(name),
            connector,
            router,
            registry: services.registry,
            settings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connector(&self) -> &BuildConnector {
        &self.connector
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Wire the project's embedded browser to the bridge.
    pub fn attach_browser(&self, browser: &dyn BrowserHost, injector: Arc<dyn QueryInjector>) {
        debug!("Attaching browser to project '{}'", self.name);
        self.connector.initialize_handlers(browser, injector);
    }

    pub fn return_to_platform(
        &self,
        navigation: Option<&dyn BrowserNavigation>,
        notifier: &dyn Notifier,
    ) {
        self.router.return_to_platform(navigation, notifier);
    }

    /// Where this project's exercise is checked out, if it is one.
    pub fn checkout_path(&self) -> Option<PathBuf> {
        if !self.registry.is_bound_exercise() {
            return None;
        }
        let info = self.registry.exercise_info()?;
        let view = if self.registry.is_instructor_view() {
            ExerciseView::Instructor
        } else {
            ExerciseView::Student
        };
        Some(exercise_full_path(&self.settings, &info, view))
    }
}
