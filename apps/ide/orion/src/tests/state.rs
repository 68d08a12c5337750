// Unit tests for the session registry actor

use crate::session::ProjectSession;
use crate::state::{PluginState, StateCommand};
use crate::tests::fakes::{
    FakeIde, FakeRegistry, InlineExecutor, services, settings_in, sorting_exercise,
};

use std::sync::Arc;

use tempfile::TempDir;

fn session(name: &str, dir: &TempDir) -> ProjectSession {
    ProjectSession::open(
        name,
        services(
            &Arc::new(FakeIde::default()),
            FakeRegistry { info: Some(sorting_exercise()), instructor: false },
        ),
        settings_in(dir.path()),
        Arc::new(InlineExecutor),
    )
}

/// **VALUE**: Verifies a registered session is readable as soon as update returns.
///
/// **BUG THIS CATCHES**: Would catch update returning before the actor applied
/// the command, which makes "open project then look it up" flaky.
#[tokio::test]
async fn given_registered_session_when_looked_up_then_found() {
    // GIVEN: Empty state
    let dir = TempDir::new().unwrap();
    let state = PluginState::new();

    // WHEN: Registering a session
    state
        .update(StateCommand::Register(session("sorting", &dir)))
        .await
        .unwrap();

    // THEN: Immediately visible
    let found = state.session("sorting").await;
    assert_eq!(found.map(|s| s.name().to_string()), Some(String::from("sorting")));
}

#[tokio::test]
async fn given_removed_session_when_looked_up_then_absent() {
    let dir = TempDir::new().unwrap();
    let state = PluginState::new();
    state
        .update(StateCommand::Register(session("sorting", &dir)))
        .await
        .unwrap();

    state
        .update(StateCommand::Remove(String::from("sorting")))
        .await
        .unwrap();

    assert!(state.session("sorting").await.is_none());
}

#[tokio::test]
async fn given_several_sessions_when_listed_then_sorted_names() {
    let dir = TempDir::new().unwrap();
    let state = PluginState::new();

    for name in ["trees", "graphs", "sorting"] {
        state
            .update(StateCommand::Register(session(name, &dir)))
            .await
            .unwrap();
    }

    assert_eq!(
        state.project_names().await,
        vec![
            String::from("graphs"),
            String::from("sorting"),
            String::from("trees")
        ]
    );
}

#[tokio::test]
async fn given_cloned_state_when_updated_then_all_clones_see_it() {
    let dir = TempDir::new().unwrap();
    let state = PluginState::new();
    let reader = state.clone();

    state
        .update(StateCommand::Register(session("sorting", &dir)))
        .await
        .unwrap();

    assert!(reader.session("sorting").await.is_some());
}
