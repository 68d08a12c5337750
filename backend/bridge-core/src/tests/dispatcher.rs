// Unit tests for inbound query dispatch

use crate::bridge::{Dispatch, QueryDispatcher};
use crate::codec::{BridgeCall, Operation};
use crate::error::BridgeError;
use crate::error::protocol::ProtocolError;
use crate::tests::fakes::{BuildFixture, InlineExecutor};

use std::sync::Arc;
use std::sync::atomic::Ordering;

fn dispatcher_for(fixture: &BuildFixture) -> QueryDispatcher {
    QueryDispatcher::new(fixture.orchestrator(Arc::new(InlineExecutor::default())))
}

/// **VALUE**: Verifies every known operation is claimed and routed exactly once.
///
/// **BUG THIS CATCHES**: Would catch a dispatcher arm that forwards to the
/// wrong orchestrator operation or forgets to report the query as handled.
#[test]
fn given_each_known_operation_when_dispatched_then_handled_and_routed_once() {
    // GIVEN: A fresh fixture per operation
    let cases = [
        BridgeCall::TriggerLocalBuild,
        BridgeCall::BuildStarted {
            exercise_instructions: String::from("instructions"),
        },
        BridgeCall::BuildFinished,
        BridgeCall::BuildFailed {
            build_logs: String::from(r#"{"error":{"Main.java":[{"line":1}]}}"#),
        },
        BridgeCall::TestResult {
            success: true,
            test_name: String::from("testSort"),
            message: String::new(),
        },
    ];

    for call in cases {
        let fixture = BuildFixture::new(true);
        let dispatcher = dispatcher_for(&fixture);

        // WHEN: The encoded call arrives
        let handled = dispatcher.on_inbound_query(&call.encode());

        // THEN: Claimed, and only the matching collaborator saw it
        assert!(handled, "{} should be handled", call.operation());
        let parser = &fixture.result_parser;
        let observed = (
            fixture.local_builds(),
            fixture.submissions(),
            parser.finished.load(Ordering::SeqCst),
            parser.compile_errors.lock().unwrap().len(),
            parser.test_results.lock().unwrap().len(),
        );
        let expected = match call.operation() {
            Operation::TriggerLocalBuild => (1, 0, 0, 0, 0),
            Operation::BuildStarted => (0, 1, 0, 0, 0),
            Operation::BuildFinished => (0, 0, 1, 0, 0),
            Operation::BuildFailed => (0, 0, 0, 1, 0),
            Operation::TestResult => (0, 0, 0, 0, 1),
        };
        assert_eq!(observed, expected, "routing of {}", call.operation());
    }
}

/// **VALUE**: Verifies queries meant for other handlers are left alone.
///
/// **WHY THIS MATTERS**: The host's query channel is shared; claiming a foreign
/// query would stop the real owner from ever seeing it.
#[test]
fn given_unknown_operation_when_dispatched_then_declined_without_side_effects() {
    let fixture = BuildFixture::new(true);
    let dispatcher = dispatcher_for(&fixture);

    assert!(!dispatcher.on_inbound_query("openProject\n42"));
    assert!(!dispatcher.on_inbound_query(""));
    assert_eq!(
        dispatcher.dispatch("buildStarted\nx").unwrap(),
        Dispatch::Declined
    );

    assert_eq!(fixture.submissions(), 0);
    assert_eq!(fixture.local_builds(), 0);
}

#[test]
fn given_known_operation_when_dispatch_called_then_reports_handled() {
    let fixture = BuildFixture::new(true);
    let dispatcher = dispatcher_for(&fixture);

    let outcome = dispatcher.dispatch("BuildFinished").unwrap();

    assert_eq!(outcome, Dispatch::Handled);
    assert!(outcome.is_handled());
    assert!(!Dispatch::Declined.is_handled());
}

/// **BUG THIS CATCHES**: Would catch a bad BuildFailed payload either being
/// passed on as an empty error list or being declined to other handlers.
#[test]
fn given_malformed_build_failed_when_queried_then_handled_and_nothing_forwarded() {
    let fixture = BuildFixture::new(true);
    let dispatcher = dispatcher_for(&fixture);

    let handled = dispatcher.on_inbound_query("BuildFailed\n{\"error\": \"not-an-object\"}");

    assert!(handled);
    assert!(fixture.result_parser.compile_errors.lock().unwrap().is_empty());
}

#[test]
fn given_malformed_build_failed_when_dispatched_then_protocol_error() {
    let fixture = BuildFixture::new(true);
    let dispatcher = dispatcher_for(&fixture);

    let error = dispatcher.dispatch("BuildFailed\nnot json").unwrap_err();

    assert!(matches!(
        error,
        BridgeError::Protocol(ProtocolError::MalformedPayload {
            operation: Operation::BuildFailed,
            ..
        })
    ));
}

#[test]
fn given_test_result_missing_arguments_when_queried_then_handled_and_dropped() {
    let fixture = BuildFixture::new(true);
    let dispatcher = dispatcher_for(&fixture);

    assert!(dispatcher.on_inbound_query("TestResult\ntrue"));
    assert!(matches!(
        dispatcher.dispatch("TestResult"),
        Err(BridgeError::Protocol(ProtocolError::MissingArgument { .. }))
    ));
    assert!(fixture.result_parser.test_results.lock().unwrap().is_empty());
}

#[test]
fn given_build_started_query_then_instructions_reach_parser_verbatim() {
    let fixture = BuildFixture::new(true);
    let dispatcher = dispatcher_for(&fixture);

    dispatcher.on_inbound_query("BuildStarted\n# Sorting\n\n[task][Bubble Sort](testBubbleSort)");

    assert_eq!(
        *fixture.result_parser.attached_with.lock().unwrap(),
        vec![String::from("# Sorting\n\n[task][Bubble Sort](testBubbleSort)")]
    );
}
