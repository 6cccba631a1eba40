//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the backend API, the
//! poll timer and the shutdown signal. Both frontends feed it messages and
//! read state back; external consumers can subscribe to [`EngineEvent`]s.

use chrono::{DateTime, Local};
use mcsw_client::{ServerApi, Transport};
use mcsw_core::prelude::*;
use mcsw_core::Session;
use tokio::sync::{broadcast, mpsc, watch};

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::poll::PollScheduler;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    session: Session,
    last_refreshed: Option<DateTime<Local>>,
    registry_len: usize,
    selected: Option<String>,
    running: bool,
    log: Option<String>,
    command_enabled: bool,
    alert_count: usize,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        let view = state.console_view();
        Self {
            session: state.session.clone(),
            last_refreshed: state.last_refreshed,
            registry_len: state.registry.len(),
            selected: state.selection.name().map(str::to_string),
            running: view.is_running(),
            log: view.log().map(str::to_string),
            command_enabled: view.command_enabled(&state.session),
            alert_count: state.alerts.len(),
        }
    }
}

/// Orchestration engine for the control panel client.
pub struct Engine<T> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, stdin reader).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    api: ServerApi<T>,

    poller: PollScheduler,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<T> Engine<T>
where
    T: Transport + Clone + Send + Sync + 'static,
{
    /// Create an engine talking to the backend through `transport`.
    ///
    /// Must be called inside a tokio runtime (the signal handler is spawned
    /// here). Nothing is requested until [`Engine::start`].
    pub fn new(settings: Settings, transport: T) -> Self {
        let poller = PollScheduler::new(settings.poll.interval());
        let state = AppState::with_settings(settings);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());

        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            api: ServerApi::new(transport),
            poller,
            event_tx,
        }
    }

    /// Kick off the identity fetch. Polling begins once it is applied.
    pub fn start(&mut self) {
        info!("Engine starting");
        self.process_message(Message::Startup);
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for whatever it changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.api,
            &mut self.poller,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn api(&self) -> &ServerApi<T> {
        &self.api
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Tear down: cancel the poll timer, stop accepting messages and
    /// signal background tasks. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.poller.stop();
        self.state.request_quit();

        if *self.shutdown_tx.borrow() {
            return;
        }
        self.emit(EngineEvent::Shutdown);
        let _ = self.shutdown_tx.send(true);
        info!("Engine shut down");
    }

    /// Compare pre/post snapshots and broadcast what changed.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre == post {
            return;
        }

        if pre.session != post.session {
            self.emit(EngineEvent::SessionChanged {
                session: post.session.clone(),
            });
        }

        if pre.last_refreshed != post.last_refreshed || pre.registry_len != post.registry_len {
            self.emit(EngineEvent::RegistryReplaced {
                status: self.state.last_status,
                servers: self.state.registry.servers().to_vec(),
            });
        }

        if pre.selected != post.selected {
            self.emit(EngineEvent::SelectionChanged {
                selected: post.selected.clone(),
            });
        }

        if pre.selected != post.selected || pre.running != post.running || pre.log != post.log {
            self.emit(EngineEvent::ConsoleChanged {
                selected: post.selected.clone(),
                running: post.running,
                log: post.log.clone(),
            });
        }

        if pre.command_enabled != post.command_enabled {
            self.emit(EngineEvent::CommandChannelChanged {
                enabled: post.command_enabled,
            });
        }

        // A single message either dismisses or enqueues, never both
        let added = post.alert_count.saturating_sub(pre.alert_count);
        let skip = self.state.alerts.len() - added;
        for message in self.state.alerts.iter().skip(skip) {
            self.emit(EngineEvent::Alert {
                message: message.clone(),
            });
        }
    }

    /// send() returns Err only if there are no receivers
    fn emit(&self, event: EngineEvent) {
        trace!("Engine event: {}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}
