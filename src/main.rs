//! MC Server Web - terminal control panel
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;
use mc_server_web::Args;
use mcsw_app::config::{default_config_path, init_config, load_settings, Settings};
use mcsw_client::{HttpConfig, HttpTransport};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = args.config.clone().or_else(default_config_path);

    if args.init_config {
        let Some(path) = config_path else {
            eprintln!("No config directory on this platform; pass --config <PATH>");
            std::process::exit(1);
        };
        if init_config(&path)? {
            println!("Wrote default settings to {}", path.display());
        } else {
            println!("Settings already exist at {}", path.display());
        }
        return Ok(());
    }

    let mut settings = config_path
        .as_deref()
        .map(load_settings)
        .unwrap_or_else(Settings::default);
    args.apply(&mut settings);

    mcsw_core::logging::init()?;

    let transport = HttpTransport::new(&HttpConfig {
        base_url: settings.server.url.clone(),
        session_cookie: settings.server.session_cookie.clone(),
        timeout: settings.server.timeout(),
    })?;

    if args.headless {
        mc_server_web::run_headless(settings, transport).await?;
    } else {
        mc_server_web::run(settings, transport).await?;
    }
    Ok(())
}
