// Unit tests for the page bridge installer and handler wiring

use crate::bridge::{BuildConnector, PageBridgeInstaller, bridge_script};
use crate::codec::Operation;
use crate::tests::fakes::{BuildFixture, CefQueryInjector, FakeBrowser, FakePage, InlineExecutor};

use std::sync::Arc;

/// **VALUE**: Verifies the script assigns the namespace the platform calls into.
///
/// **BUG THIS CATCHES**: Would catch a renamed global; the page would then
/// silently fall back to "no IDE connected".
#[test]
fn given_injector_when_script_built_then_assigns_connector_namespace() {
    let script = bridge_script(&CefQueryInjector);

    assert!(script.starts_with("window.orionBuildConnector = {"));
    assert!(script.ends_with("};"));
}

#[test]
fn given_script_then_every_operation_defined_exactly_once() {
    let script = bridge_script(&CefQueryInjector);

    for operation in Operation::ALL {
        let definition = format!("{}: function(", operation.name());
        assert_eq!(
            script.matches(&definition).count(),
            1,
            "{operation} should be defined once"
        );
    }
}

/// **VALUE**: Verifies each function body joins its name and parameters with
/// newlines, in the order the decoder reads them.
#[test]
fn given_script_then_request_expressions_follow_line_codec() {
    let script = bridge_script(&CefQueryInjector);

    assert!(script.contains("TestResult: function(success, testName, message) {"));
    assert!(script.contains(
        "window.cefQuery({request: 'TestResult' + '\\n' + success + '\\n' + testName + '\\n' + message});"
    ));
    assert!(script.contains("BuildStarted: function(exerciseInstructions) {"));
    assert!(script.contains("'BuildStarted' + '\\n' + exerciseInstructions"));
    assert!(script.contains("TriggerLocalBuild: function() {"));
    assert!(script.contains("window.cefQuery({request: 'TriggerLocalBuild'});"));
}

/// **WHY THIS MATTERS**: Every load-end reinstalls; two loads must leave the
/// page in the same state as one.
#[test]
fn given_two_installs_when_page_loads_twice_then_identical_scripts() {
    let installer = PageBridgeInstaller::new(Arc::new(CefQueryInjector));
    let page = FakePage::default();

    installer.install(&page);
    installer.install(&page);

    let scripts = page.scripts.lock().unwrap();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0], scripts[1]);
    assert_eq!(scripts[0].1, "https://artemis.example/#/courses");
}

#[test]
fn given_initialized_connector_when_page_loads_then_script_installed() {
    // GIVEN: A connector wired into a browser
    let fixture = BuildFixture::new(true);
    let connector =
        BuildConnector::new(fixture.collaborators(), Arc::new(InlineExecutor::default()));
    let browser = FakeBrowser::default();
    connector.initialize_handlers(&browser, Arc::new(CefQueryInjector));

    // WHEN: A page finishes loading
    let page = FakePage::default();
    browser.finish_load(&page);

    // THEN: The bridge script was executed once in that page
    let scripts = page.scripts.lock().unwrap();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].0, bridge_script(&CefQueryInjector));
}

/// **VALUE**: Verifies the registered query handler reaches the orchestrator.
#[test]
fn given_initialized_connector_when_query_sent_then_routed_to_orchestrator() {
    let fixture = BuildFixture::new(true);
    let connector =
        BuildConnector::new(fixture.collaborators(), Arc::new(InlineExecutor::default()));
    let browser = FakeBrowser::default();
    connector.initialize_handlers(&browser, Arc::new(CefQueryInjector));

    assert!(browser.send_query("TriggerLocalBuild"));
    assert!(!browser.send_query("somethingElse"));

    assert_eq!(fixture.local_builds(), 1);
}
