use crate::bridge_tests::helpers::{CefQueryInjector, TestBrowser, TestIde, TestPage, wait_until};

use bridge_core::bridge::{BuildConnector, bridge_script};
use bridge_core::build::{BuildCycleState, TokioExecutor};

use common::RepositoryType;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

fn connect(ide: &Arc<TestIde>, browser: &TestBrowser) -> BuildConnector {
    let executor = TokioExecutor::current().expect("Tests run inside a tokio runtime");
    let connector = BuildConnector::new(ide.collaborators(), Arc::new(executor));
    connector.initialize_handlers(browser, Arc::new(CefQueryInjector));
    connector
}

/// **VALUE**: Verifies a full platform-triggered build cycle through the bridge.
///
/// **WHY THIS MATTERS**: This is the path every "Submit" click in the platform
/// takes: page load installs the connector, the page reports the build start,
/// the IDE submits and launches, and results flow back to the result view.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The load handler does not install the connector
/// - Queries are not routed to the orchestrator
/// - The cycle does not run on the background pool
/// - Results are not forwarded after attachment
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_loaded_page_when_platform_runs_build_then_results_reach_ide() {
    // GIVEN: A connected browser with a loaded page
    let ide = TestIde::new(true, Duration::from_millis(20));
    let browser = TestBrowser::default();
    let connector = connect(&ide, &browser);
    let page = TestPage::default();
    browser.load_end(&page);
    assert_eq!(
        *page.scripts.lock().unwrap(),
        vec![bridge_script(&CefQueryInjector)]
    );

    // WHEN: The page reports a build start
    assert!(browser.page_query("BuildStarted\n# Sorting\n[task][Sort](testSort)"));

    // THEN: The cycle submits, launches and attaches in the background
    assert!(wait_until(|| ide.attached.load(Ordering::SeqCst)).await);
    assert_eq!(ide.submissions.load(Ordering::SeqCst), 1);
    assert_eq!(*ide.launches.lock().unwrap(), vec![true]);
    assert_eq!(connector.orchestrator().state(), BuildCycleState::Attached);

    // WHEN: Results arrive
    assert!(browser.page_query("TestResult\nfalse\ntestSort\nexpected [1, 2]\nbut was [2, 1]"));
    assert!(browser.page_query("BuildFinished"));

    // THEN: The result view saw them and released the attachment
    assert_eq!(
        *ide.test_results.lock().unwrap(),
        vec![(
            false,
            String::from("testSort"),
            String::from("expected [1, 2]\nbut was [2, 1]")
        )]
    );
    assert_eq!(ide.finished.load(Ordering::SeqCst), 1);
    assert_eq!(connector.orchestrator().state(), BuildCycleState::Idle);
}

/// **VALUE**: Verifies duplicate build-start events launch a single run.
///
/// **BUG THIS CATCHES**: Would catch a race where two pool threads both pass
/// the attachment check while a slow submission is in flight.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_slow_submission_when_build_started_twice_then_single_launch() {
    // GIVEN: A submission that takes a while
    let ide = TestIde::new(true, Duration::from_millis(100));
    let browser = TestBrowser::default();
    let _connector = connect(&ide, &browser);

    // WHEN: Two build starts arrive back to back
    browser.page_query("BuildStarted\ninstructions");
    browser.page_query("BuildStarted\ninstructions");

    // THEN: One submission, one launch
    assert!(wait_until(|| ide.launch_count() == 1).await);
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(ide.launch_count(), 1);
    assert_eq!(ide.submissions.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_failed_submission_when_build_started_then_nothing_launched() {
    let ide = TestIde::new(false, Duration::from_millis(5));
    let browser = TestBrowser::default();
    let connector = connect(&ide, &browser);

    browser.page_query("BuildStarted\ninstructions");

    assert!(wait_until(|| ide.submissions.load(Ordering::SeqCst) == 1).await);
    assert!(wait_until(|| connector.orchestrator().state() == BuildCycleState::Idle).await);
    assert_eq!(ide.launch_count(), 0);
    assert!(!ide.attached.load(Ordering::SeqCst));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_instructor_page_when_template_sentinel_sent_then_template_selected() {
    let ide = TestIde::new(true, Duration::ZERO);
    let browser = TestBrowser::default();
    let _connector = connect(&ide, &browser);

    assert!(browser.page_query("BuildStarted\nTEMPLATE"));

    assert_eq!(*ide.selected.lock().unwrap(), vec![RepositoryType::Template]);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ide.submissions.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_compile_failure_when_reported_then_errors_per_file_forwarded() {
    let ide = TestIde::new(true, Duration::ZERO);
    let browser = TestBrowser::default();
    let _connector = connect(&ide, &browser);

    let handled = browser.page_query(
        "BuildFailed\n{\"error\":{\"src/Sort.java\":[{\"line\":5,\"column\":9,\"message\":\"';' expected\"}]}}",
    );

    assert!(handled);
    let errors = ide.compile_errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file_path, "src/Sort.java");
    assert_eq!(errors[0].errors[0].column(), Some(9));
    assert_eq!(errors[0].errors[0].message(), Some("';' expected"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_local_build_request_then_runner_called_and_foreign_queries_declined() {
    let ide = TestIde::new(true, Duration::ZERO);
    let browser = TestBrowser::default();
    let _connector = connect(&ide, &browser);

    assert!(browser.page_query("TriggerLocalBuild"));
    assert!(!browser.page_query("cloneRepository\nhttps://git.example/repo.git"));

    assert!(wait_until(|| ide.local_builds.load(Ordering::SeqCst) == 1).await);
}
