//! mcsw-app - Application state and orchestration for MC Server Web
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management,
//! the Engine abstraction shared by the terminal and headless frontends, the
//! registry poll timer, and configuration loading.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod poll;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{Task, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{CommandEdit, Message};
pub use poll::PollScheduler;
pub use state::{AppPhase, AppState, CommandInput, RefreshState, UiMode};

// Re-export domain types for the view layer
pub use mcsw_core::{ConsoleView, Registry, Selection, ServerSummary, Session};
