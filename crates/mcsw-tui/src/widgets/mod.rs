//! Custom widget components

mod alert_dialog;
mod confirm_dialog;
mod console;
mod header;
pub mod modal_overlay;
mod server_list;
mod status_bar;

pub use alert_dialog::AlertDialog;
pub use confirm_dialog::ConfirmQuitDialog;
pub use console::ConsolePanel;
pub use header::MainHeader;
pub use server_list::ServerList;
pub use status_bar::StatusBar;
