//! Engine integration tests against a scripted backend
//!
//! Run with: cargo test --test engine_integration

use std::time::Duration;

use mc_server_web::headless::parse_command;
use mcsw_app::config::Settings;
use mcsw_app::{Engine, EngineEvent, Message};
use mcsw_client::endpoints;
use mcsw_client::test_utils::MockTransport;
use mcsw_client::Transport;
use mcsw_core::ConsoleView;
use serde_json::json;

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

/// Backend with bob signed in and two servers, A running and B stopped
fn backend() -> MockTransport {
    let mock = MockTransport::new();
    mock.respond(endpoints::AUTH_INFO, 200, json!({"name": "bob", "admin": false}));
    mock.respond(
        endpoints::LIST,
        200,
        json!({"data": [
            {"name": "A", "running": true, "log": "[Server] bob joined the game", "is_admin": true},
            {"name": "B", "running": false, "log": null, "is_admin": false}
        ]}),
    );
    mock
}

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.poll.interval_ms = 3_000;
    settings
}

/// Receive and process messages until `done` holds.
///
/// The timeout is well past the poll period so paused-clock tests can wait
/// for ticks.
async fn pump_until<T, F>(engine: &mut Engine<T>, done: F)
where
    T: Transport + Clone + Send + Sync + 'static,
    F: Fn(&Engine<T>) -> bool,
{
    while !done(engine) {
        let msg = tokio::time::timeout(Duration::from_secs(60), engine.msg_rx.recv())
            .await
            .expect("timed out waiting for message")
            .expect("channel closed");
        engine.process_message(msg);
    }
}

async fn started(mock: &MockTransport) -> Engine<MockTransport> {
    let mut engine = Engine::new(settings(), mock.clone());
    engine.start();
    pump_until(&mut engine, |e| !e.state.registry.is_empty()).await;
    engine
}

// ─────────────────────────────────────────────────────────
// Polling
// ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_poll_tick_replaces_registry() {
    let mock = backend();
    let mut engine = started(&mock).await;
    assert_eq!(mock.count(endpoints::LIST), 1);

    mock.respond(
        endpoints::LIST,
        200,
        json!({"data": [{"name": "A", "running": false, "log": null, "is_admin": true}]}),
    );
    pump_until(&mut engine, |e| e.state.registry.len() == 1).await;

    assert_eq!(mock.count(endpoints::LIST), 2);
    assert!(!engine.state.registry.is_running("A"));
    assert!(matches!(
        engine.state.console_view(),
        ConsoleView::Stopped { .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_ticks_coalesce_while_fetch_in_flight() {
    let mock = backend();
    mock.delay(endpoints::LIST, Duration::from_secs(10));
    let mut engine = Engine::new(settings(), mock.clone());

    engine.start();
    // Ticks at 3s, 6s and 9s land on the fetch started at 0s
    pump_until(&mut engine, |e| !e.state.registry.is_empty()).await;

    assert_eq!(mock.count(endpoints::LIST), 1);
    assert!(!engine.state.refresh.in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_forced_refresh_runs_after_in_flight_fetch() {
    let mock = backend();
    let mut engine = started(&mock).await;
    mock.delay(endpoints::LIST, Duration::from_millis(500));

    engine.process_message(Message::RefreshRequested);
    engine.process_message(Message::RefreshRequested);
    assert!(engine.state.refresh.pending_forced());

    pump_until(&mut engine, |e| {
        !e.state.refresh.in_flight() && !e.state.refresh.pending_forced()
    })
    .await;

    // Initial fetch, the first forced one, then one queued behind it
    assert_eq!(mock.count(endpoints::LIST), 3);
}

#[tokio::test(start_paused = true)]
async fn test_no_ticks_after_shutdown() {
    let mock = backend();
    let mut engine = started(&mock).await;
    assert!(engine.is_polling());

    engine.shutdown();
    tokio::time::sleep(Duration::from_secs(30)).await;

    while let Ok(msg) = engine.msg_rx.try_recv() {
        assert!(!matches!(msg, Message::PollTick), "tick after shutdown");
        engine.process_message(msg);
    }
    assert_eq!(mock.count(endpoints::LIST), 1);
    assert!(engine.should_quit());
}

// ─────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_vanished_selection_is_kept() {
    let mock = backend();
    let mut engine = started(&mock).await;
    assert_eq!(engine.state.selection.name(), Some("A"));

    mock.respond(
        endpoints::LIST,
        200,
        json!({"data": [{"name": "B", "running": true, "log": "x", "is_admin": false}]}),
    );
    engine.process_message(Message::RefreshRequested);
    pump_until(&mut engine, |e| !e.state.refresh.in_flight()).await;

    assert_eq!(engine.state.selection.name(), Some("A"));
    assert_eq!(
        engine.state.console_view(),
        ConsoleView::NotFound { name: "A" }
    );
    assert!(!engine.state.command_enabled());
}

#[tokio::test]
async fn test_failed_fetch_clears_registry_but_keeps_selection() {
    let mock = backend();
    let mut engine = started(&mock).await;

    mock.respond(endpoints::LIST, 500, json!({"message": "boom"}));
    engine.process_message(Message::RefreshRequested);
    pump_until(&mut engine, |e| !e.state.refresh.in_flight()).await;

    assert!(engine.state.registry.is_empty());
    assert_eq!(engine.state.last_status, Some(500));
    assert_eq!(engine.state.selection.name(), Some("A"));
    // Polling failures stay silent
    assert!(engine.state.alerts.is_empty());
}

#[tokio::test]
async fn test_select_forces_refresh() {
    let mock = backend();
    let mut engine = started(&mock).await;

    engine.process_message(Message::SelectServer { name: "B".into() });
    pump_until(&mut engine, |e| !e.state.refresh.in_flight()).await;

    assert_eq!(engine.state.selection.name(), Some("B"));
    assert_eq!(mock.count(endpoints::LIST), 2);
}

// ─────────────────────────────────────────────────────────
// Commands and lifecycle
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_headless_run_command_reaches_backend() {
    let mock = backend();
    mock.respond(endpoints::RUN_COMMAND, 200, json!({"message": "Command sent!"}));
    let mut engine = started(&mock).await;

    for msg in parse_command("run say hi").unwrap() {
        engine.process_message(msg);
    }
    assert!(engine.state.command.pending);
    pump_until(&mut engine, |e| !e.state.command.pending).await;

    let sent: Vec<_> = mock
        .requests()
        .into_iter()
        .filter(|r| r.path == endpoints::RUN_COMMAND)
        .collect();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, json!({"name": "A", "command": "say hi"}));
    assert!(engine.state.command.is_empty());
    assert!(engine.state.alerts.is_empty());
}

#[tokio::test]
async fn test_failed_command_keeps_text_and_alerts() {
    let mock = backend();
    mock.respond(endpoints::RUN_COMMAND, 400, json!({"message": "Server not running"}));
    let mut engine = started(&mock).await;
    let mut events = engine.subscribe();

    for msg in parse_command("run stop").unwrap() {
        engine.process_message(msg);
    }
    pump_until(&mut engine, |e| !e.state.command.pending).await;

    assert_eq!(engine.state.command.text, "stop");
    assert_eq!(engine.state.current_alert(), Some("Server not running"));

    let mut saw_alert = false;
    while let Ok(event) = events.try_recv() {
        if let EngineEvent::Alert { message } = event {
            assert_eq!(message, "Server not running");
            saw_alert = true;
        }
    }
    assert!(saw_alert);
}

#[tokio::test]
async fn test_logout_clears_session_and_registry() {
    let mock = backend();
    mock.respond(endpoints::AUTH_LOGOUT, 200, json!({"message": "Logged out"}));
    let mut engine = started(&mock).await;

    engine.process_message(Message::Logout);
    pump_until(&mut engine, |e| !e.state.session.is_signed_in()).await;

    assert!(engine.state.registry.is_empty());
    assert_eq!(engine.state.selection.name(), None);
    assert_eq!(engine.state.console_view(), ConsoleView::NoSelection);
    assert_eq!(mock.count(endpoints::AUTH_LOGOUT), 1);
}
