//! Main TUI runner - entry point and event loop

use mcsw_app::config::Settings;
use mcsw_app::Engine;
use mcsw_client::Transport;
use mcsw_core::prelude::*;

use super::{event, render, terminal};

/// Run the terminal UI against `transport` until the user quits
pub async fn run<T>(settings: Settings, transport: T) -> Result<()>
where
    T: Transport + Clone + Send + Sync + 'static,
{
    terminal::install_panic_hook();

    let mut engine = Engine::new(settings, transport);
    engine.start();

    let mut term = ratatui::init();
    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    ratatui::restore();

    if let Err(ref e) = result {
        error!("TUI loop failed: {}", e);
    }
    result
}

/// Drain messages, draw, read one key; repeat until quit
fn run_loop<T>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<T>) -> Result<()>
where
    T: Transport + Clone + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Replies, poll ticks and signals
        engine.drain_pending_messages();
        if engine.should_quit() {
            break;
        }

        terminal
            .draw(|frame| render::view(frame, &engine.state))
            .map_err(|e| Error::terminal(format!("Failed to draw: {}", e)))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("TUI loop finished");
    Ok(())
}
