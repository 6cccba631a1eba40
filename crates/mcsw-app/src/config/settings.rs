//! Settings loader for `config.toml`

use std::path::{Path, PathBuf};

use mcsw_core::prelude::*;

use super::types::Settings;

const CONFIG_DIR: &str = "mc-server-web";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# MC Server Web terminal client configuration

[server]
# Root URL of the MC Server Web backend
url = "http://localhost:5000/"
# Value of the `session` cookie from a browser login (sign in on the web
# panel, then copy the cookie here)
# session_cookie = ""
# Request timeout in milliseconds
timeout_ms = 10000

[poll]
# How often the server list is refreshed, in milliseconds (minimum 500)
interval_ms = 3000

[ui]
# Ask before quitting
confirm_quit = false
# Console lines shown for the selected server (0 = all)
max_log_lines = 200

[download]
# Where modpacks are saved; defaults to the user's download directory
# dir = "/home/me/Downloads"
"#;

/// `<config_dir>/mc-server-web/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`, falling back to defaults when the file is
/// missing or malformed
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Write the commented default config to `path`.
///
/// Returns `false` without touching the file when it already exists.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote default config to {:?}", path);
    Ok(true)
}
