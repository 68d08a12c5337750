use bridge_core::bridge::{BrowserHost, LoadHandler, QueryHandler, QueryInjector};
use bridge_core::build::{
    BuildCollaborators, BuildRunner, RepositorySelection, ResultParser, RunConfigurationLauncher,
    SubmissionService,
};
use bridge_core::routing::ExerciseRegistry;
use bridge_core::settings::{SettingKey, SettingsStore};

use common::{BuildLogFileErrors, ExerciseInfo, RepositoryType};

use orion::error::OrionError;
use orion::plugin::{OrionPlugin, PluginPaths};
use orion::session::ProjectServices;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;
use tokio::runtime::Handle;

// ============================================================================
// Integration tests for plugin startup + bridge-core sessions
// These run the real settings, logger and blocking pool together
// ============================================================================

#[derive(Default)]
struct CountingIde {
    submissions: AtomicUsize,
    launches: AtomicUsize,
    attached: AtomicBool,
}

impl SubmissionService for CountingIde {
    fn submit_changes(&self) -> bool {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        true
    }
}

impl BuildRunner for CountingIde {
    fn run_local_build_and_test(&self) {}
}

impl RunConfigurationLauncher for CountingIde {
    fn launch(&self, _server_triggered: bool) {
        self.launches.fetch_add(1, Ordering::SeqCst);
    }
}

impl ResultParser for CountingIde {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn attach(&self, _instructions: &str) {
        self.attached.store(true, Ordering::SeqCst);
    }

    fn on_finished(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    fn on_compile_errors(&self, _errors: Vec<BuildLogFileErrors>) {}

    fn on_test_result(&self, _success: bool, _test_name: &str, _message: &str) {}
}

impl RepositorySelection for CountingIde {
    fn select_repository(&self, _repository: RepositoryType) {}
}

struct NoExercise;

impl ExerciseRegistry for NoExercise {
    fn is_bound_exercise(&self) -> bool {
        false
    }

    fn exercise_info(&self) -> Option<ExerciseInfo> {
        None
    }

    fn is_instructor_view(&self) -> bool {
        false
    }
}

struct PassThroughInjector;

impl QueryInjector for PassThroughInjector {
    fn inject(&self, request: &str) -> String {
        format!("query({request});")
    }
}

#[derive(Default)]
struct QueryOnlyBrowser {
    handlers: Mutex<Vec<QueryHandler>>,
}

impl QueryOnlyBrowser {
    fn query(&self, raw: &str) -> bool {
        self.handlers.lock().unwrap().iter().any(|handler| handler(raw))
    }
}

impl BrowserHost for QueryOnlyBrowser {
    fn add_query_handler(&self, handler: QueryHandler) {
        self.handlers.lock().unwrap().push(handler);
    }

    fn add_load_handler(&self, _handler: LoadHandler) {}
}

fn services(ide: &Arc<CountingIde>) -> ProjectServices {
    ProjectServices {
        collaborators: BuildCollaborators {
            submission: ide.clone(),
            build_runner: ide.clone(),
            launcher: ide.clone(),
            result_parser: ide.clone(),
            repository_selection: ide.clone(),
        },
        registry: Arc::new(NoExercise),
    }
}

/// **VALUE**: Tests plugin startup against an empty profile directory.
///
/// **WHY THIS MATTERS**: This is the first-run path of every installation:
/// no settings file, no log directory.
///
/// **BUG THIS CATCHES**: Would catch if startup requires an existing settings
/// file or does not create the log directory before installing the logger.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn given_empty_profile_when_plugin_initialized_then_defaults_and_log_file() {
    // GIVEN: An empty profile directory
    let root = TempDir::new().expect("Temp dir");
    let paths = PluginPaths::under(root.path().to_path_buf());

    // WHEN: Initializing the plugin
    let plugin = OrionPlugin::initialize(&paths, Handle::current()).expect("Plugin starts");

    // THEN: Log directory exists and settings are the defaults
    assert!(paths.log_dir.is_dir());
    assert!(!plugin.settings().get(SettingKey::ArtemisUrl).is_empty());
    assert!(plugin.open_projects().await.is_empty());
}

/// **VALUE**: Verifies an opened project's bridge runs a build cycle on the
/// plugin's blocking pool and is dropped on close.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn given_open_project_when_build_started_then_cycle_runs_and_close_forgets_session() {
    // GIVEN: A started plugin with one project and its browser
    let root = TempDir::new().expect("Temp dir");
    let plugin = OrionPlugin::initialize(
        &PluginPaths::under(root.path().to_path_buf()),
        Handle::current(),
    )
    .expect("Plugin starts");
    let ide = Arc::new(CountingIde::default());
    let session = plugin
        .open_project("sorting", services(&ide))
        .await
        .expect("Project opens");
    let browser = QueryOnlyBrowser::default();
    session.attach_browser(&browser, Arc::new(PassThroughInjector));

    // WHEN: The page reports a build start
    assert!(browser.query("BuildStarted\n# Sorting"));

    // THEN: The cycle runs in the background
    let mut launched = false;
    for _ in 0..200 {
        if ide.launches.load(Ordering::SeqCst) == 1 {
            launched = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(launched, "Build should launch on the blocking pool");
    assert_eq!(ide.submissions.load(Ordering::SeqCst), 1);
    assert_eq!(plugin.open_projects().await, vec![String::from("sorting")]);

    // WHEN: The project closes
    plugin.close_project("sorting").await.expect("Project closes");

    // THEN: The session is gone
    assert!(plugin.session("sorting").await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn given_unknown_project_when_closed_then_session_error() {
    let root = TempDir::new().expect("Temp dir");
    let plugin = OrionPlugin::initialize(
        &PluginPaths::under(root.path().to_path_buf()),
        Handle::current(),
    )
    .expect("Plugin starts");

    let result = plugin.close_project("never-opened").await;

    assert!(matches!(result, Err(OrionError::Session { .. })));
}

/// **BUG THIS CATCHES**: Would catch startup silently falling back to defaults
/// when the user's settings file is corrupt, discarding their configuration.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn given_corrupt_settings_when_plugin_initialized_then_settings_error() {
    let root = TempDir::new().expect("Temp dir");
    std::fs::write(root.path().join("settings.json"), "{ broken").expect("Write settings");

    let result = OrionPlugin::initialize(
        &PluginPaths::under(root.path().to_path_buf()),
        Handle::current(),
    );

    assert!(matches!(result, Err(OrionError::Settings { .. })));
}
