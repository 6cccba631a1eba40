//! Configuration file parsing
//!
//! Settings live in `<config_dir>/mc-server-web/config.toml`; a different
//! file can be passed on the command line.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config, load_settings};
pub use types::*;
