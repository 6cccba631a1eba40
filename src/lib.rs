//! MC Server Web
//!
//! Terminal control panel for a game-server hosting backend. The engine,
//! client and widgets live in the workspace crates; this crate wires them
//! into the `mcsw` binary.

pub mod cli;
pub mod headless;

pub use cli::Args;
pub use headless::runner::run_headless;
pub use mcsw_tui::run;
