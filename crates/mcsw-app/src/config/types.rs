//! Settings types for `config.toml`

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lower bound for the registry poll interval
pub const MIN_POLL_INTERVAL_MS: u64 = 500;

/// Application settings (`<config_dir>/mc-server-web/config.toml`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub poll: PollSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub download: DownloadSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Backend root URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Value of the backend's `session` cookie, copied from a browser login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            session_cookie: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Registry polling settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollSettings {
    /// Poll period in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl PollSettings {
    /// Poll period, clamped to [`MIN_POLL_INTERVAL_MS`]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

/// Terminal UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Ask before quitting
    #[serde(default)]
    pub confirm_quit: bool,

    /// Console lines rendered for the selected server (0 = all)
    #[serde(default = "default_max_log_lines")]
    pub max_log_lines: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            confirm_quit: false,
            max_log_lines: default_max_log_lines(),
        }
    }
}

/// Modpack download settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DownloadSettings {
    /// Target directory; the user's download directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl DownloadSettings {
    /// Directory downloads are written to
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_url() -> String {
    "http://localhost:5000/".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_interval_ms() -> u64 {
    3_000
}

fn default_max_log_lines() -> usize {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.url, "http://localhost:5000/");
        assert_eq!(settings.server.timeout(), Duration::from_secs(10));
        assert_eq!(settings.poll.interval(), Duration::from_secs(3));
        assert_eq!(settings.ui.max_log_lines, 200);
        assert!(!settings.ui.confirm_quit);
        assert!(settings.download.dir.is_none());
    }

    #[test]
    fn test_poll_interval_clamped() {
        let poll = PollSettings { interval_ms: 10 };
        assert_eq!(poll.interval(), Duration::from_millis(MIN_POLL_INTERVAL_MS));
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[server]
url = "https://mc.example.com"

[ui]
max_log_lines = 50
"#,
        )
        .unwrap();
        assert_eq!(settings.server.url, "https://mc.example.com");
        assert_eq!(settings.server.timeout_ms, 10_000);
        assert_eq!(settings.ui.max_log_lines, 50);
        assert_eq!(settings.poll.interval_ms, 3_000);
    }

    #[test]
    fn test_explicit_download_dir() {
        let download = DownloadSettings {
            dir: Some(PathBuf::from("/tmp/packs")),
        };
        assert_eq!(download.resolved_dir(), PathBuf::from("/tmp/packs"));
    }
}
