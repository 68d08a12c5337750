//! Test helpers for bridge integration tests.
//!
//! This module provides an in-process stand-in for the embedded browser and
//! the IDE collaborators:
//! - A browser that keeps registered handlers and replays page queries
//! - A page that captures executed scripts
//! - Collaborators that record calls and can be polled from async tests

use bridge_core::bridge::{
    BrowserHost, LoadHandler, PageHandle, QueryHandler, QueryInjector,
};
use bridge_core::build::{
    BuildCollaborators, BuildRunner, RepositorySelection, ResultParser, RunConfigurationLauncher,
    SubmissionService,
};

use common::{BuildLogFileErrors, RepositoryType};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PAGE_URL: &str = "https://artemis.example/#/courses/3/exercises/7";

/// Injector producing the query call a JCEF host exposes.
pub struct CefQueryInjector;

impl QueryInjector for CefQueryInjector {
    fn inject(&self, request: &str) -> String {
        format!("window.cefQuery({{request: {request}}});")
    }
}

#[derive(Default)]
pub struct TestBrowser {
    query_handlers: Mutex<Vec<QueryHandler>>,
    load_handlers: Mutex<Vec<LoadHandler>>,
}

impl TestBrowser {
    /// Offer `raw` to the registered handlers the way the query router does.
    pub fn page_query(&self, raw: &str) -> bool {
        self.query_handlers
            .lock()
            .unwrap()
            .iter()
            .any(|handler| handler(raw))
    }

    pub fn load_end(&self, page: &dyn PageHandle) {
        for handler in self.load_handlers.lock().unwrap().iter() {
            handler(page);
        }
    }
}

impl BrowserHost for TestBrowser {
    fn add_query_handler(&self, handler: QueryHandler) {
        self.query_handlers.lock().unwrap().push(handler);
    }

    fn add_load_handler(&self, handler: LoadHandler) {
        self.load_handlers.lock().unwrap().push(handler);
    }
}

#[derive(Default)]
pub struct TestPage {
    pub scripts: Mutex<Vec<String>>,
}

impl PageHandle for TestPage {
    fn url(&self) -> String {
        String::from(PAGE_URL)
    }

    fn execute_script(&self, script: &str, _script_url: &str) {
        self.scripts.lock().unwrap().push(script.to_string());
    }
}

/// Every collaborator in one place, with a configurable submission delay.
pub struct TestIde {
    pub submit_succeeds: bool,
    pub submit_delay: Duration,
    pub submissions: AtomicUsize,
    pub local_builds: AtomicUsize,
    pub launches: Mutex<Vec<bool>>,
    pub attached: AtomicBool,
    pub attachments: Mutex<Vec<String>>,
    pub finished: AtomicUsize,
    pub compile_errors: Mutex<Vec<BuildLogFileErrors>>,
    pub test_results: Mutex<Vec<(bool, String, String)>>,
    pub selected: Mutex<Vec<RepositoryType>>,
}

impl TestIde {
    pub fn new(submit_succeeds: bool, submit_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            submit_succeeds,
            submit_delay,
            submissions: AtomicUsize::new(0),
            local_builds: AtomicUsize::new(0),
            launches: Mutex::new(Vec::new()),
            attached: AtomicBool::new(false),
            attachments: Mutex::new(Vec::new()),
            finished: AtomicUsize::new(0),
            compile_errors: Mutex::new(Vec::new()),
            test_results: Mutex::new(Vec::new()),
            selected: Mutex::new(Vec::new()),
        })
    }

    pub fn collaborators(self: &Arc<Self>) -> BuildCollaborators {
        BuildCollaborators {
            submission: self.clone(),
            build_runner: self.clone(),
            launcher: self.clone(),
            result_parser: self.clone(),
            repository_selection: self.clone(),
        }
    }

    pub fn launch_count(&self) -> usize {
        self.launches.lock().unwrap().len()
    }
}

impl SubmissionService for TestIde {
    fn submit_changes(&self) -> bool {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.submit_delay);
        self.submit_succeeds
    }
}

impl BuildRunner for TestIde {
    fn run_local_build_and_test(&self) {
        self.local_builds.fetch_add(1, Ordering::SeqCst);
    }
}

impl RunConfigurationLauncher for TestIde {
    fn launch(&self, server_triggered: bool) {
        self.launches.lock().unwrap().push(server_triggered);
    }
}

impl ResultParser for TestIde {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn attach(&self, instructions: &str) {
        self.attached.store(true, Ordering::SeqCst);
        self.attachments
            .lock()
            .unwrap()
            .push(instructions.to_string());
    }

    fn on_finished(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
        self.attached.store(false, Ordering::SeqCst);
    }

    fn on_compile_errors(&self, errors: Vec<BuildLogFileErrors>) {
        self.compile_errors.lock().unwrap().extend(errors);
    }

    fn on_test_result(&self, success: bool, test_name: &str, message: &str) {
        self.test_results.lock().unwrap().push((
            success,
            test_name.to_string(),
            message.to_string(),
        ));
    }
}

impl RepositorySelection for TestIde {
    fn select_repository(&self, repository: RepositoryType) {
        self.selected.lock().unwrap().push(repository);
    }
}

/// Poll `condition` until it holds or roughly two seconds pass.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
