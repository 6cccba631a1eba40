//! Command-line arguments and how they override the settings file

use std::path::PathBuf;

use clap::Parser;
use mcsw_app::config::Settings;

/// MC Server Web - terminal control panel for game-server hosts
#[derive(Parser, Debug, Default)]
#[command(name = "mcsw")]
#[command(about = "Terminal control panel for MC Server Web game-server hosts", long_about = None)]
pub struct Args {
    /// Backend root URL (overrides `server.url`)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Settings file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Registry poll interval in milliseconds (overrides `poll.interval_ms`)
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Session cookie from a browser login (overrides `server.session_cookie`)
    #[arg(long, value_name = "VALUE", env = "MCSW_SESSION")]
    pub session_cookie: Option<String>,

    /// Run in headless mode (NDJSON events on stdout, commands on stdin)
    #[arg(long)]
    pub headless: bool,

    /// Write a commented default settings file and exit
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.url {
            settings.server.url = url.clone();
        }
        if let Some(ms) = self.interval_ms {
            settings.poll.interval_ms = ms;
        }
        if let Some(cookie) = &self.session_cookie {
            settings.server.session_cookie = Some(cookie.clone());
        }
    }
}
