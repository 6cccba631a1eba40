//! Headless mode runner - main event loop without TUI

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use mcsw_app::config::Settings;
use mcsw_app::{Engine, EngineEvent, Message};
use mcsw_client::Transport;
use mcsw_core::prelude::*;

use super::{parse_command, HeadlessEvent};

/// Run in headless mode until `quit`, a signal, or stdin closes
pub async fn run_headless<T>(settings: Settings, transport: T) -> Result<()>
where
    T: Transport + Clone + Send + Sync + 'static,
{
    info!("Starting in headless mode against {}", settings.server.url);

    let mut engine = Engine::new(settings, transport);
    let mut events = engine.subscribe();

    // Blocking stdin reader on its own thread
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    engine.start();
    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown();
    flush_events(&mut events);
    info!("Headless mode exiting");
    result
}

/// Process messages and print every resulting event
pub async fn headless_event_loop<T>(
    engine: &mut Engine<T>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()>
where
    T: Transport + Clone + Send + Sync + 'static,
{
    flush_events(events);

    while !engine.should_quit() {
        let Some(msg) = engine.msg_rx.recv().await else {
            info!("Message channel closed");
            break;
        };
        engine.process_message(msg);

        // Nobody is there to press Enter; alerts go out as events only
        while engine.state.current_alert().is_some() {
            engine.process_message(Message::DismissAlert);
        }

        flush_events(events);
    }

    Ok(())
}

fn flush_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::new(&event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                warn!("Headless output lagged, {} events dropped", n);
            }
            Err(_) => break,
        }
    }
}

/// Read commands from stdin and forward them as messages
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(messages) = parse_command(&line) else {
            warn!("Unknown stdin command: {}", line.trim());
            continue;
        };

        let quitting = messages.iter().any(|m| matches!(m, Message::Quit));
        for msg in messages {
            if msg_tx.blocking_send(msg).is_err() {
                return;
            }
        }
        if quitting {
            break;
        }
    }

    // EOF on stdin ends the session
    info!("Stdin reader exiting");
    let _ = msg_tx.blocking_send(Message::Quit);
}
