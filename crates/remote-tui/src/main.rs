mod action;
mod app;
mod app_state;
mod component;
mod components;
mod connection;
mod theme;
mod widgets;

use std::time::Duration;

use clap::Parser;
use remote_proto::config::Config;
use remote_proto::{platform, Command};

#[derive(Parser, Debug)]
#[command(name = "mpv-remote", about = "Terminal remote for an mpv playback backend")]
struct Cli {
    /// Backend WebSocket URL (overrides `[backend] url` in config.toml)
    #[arg(long)]
    url: Option<String>,

    /// Send one command (e.g. `play:some query`, `pause:true`, `kill:all`) and exit
    #[arg(long, value_name = "COMMAND")]
    send: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = platform::log_path();

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG wins over the config file
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    let url = cli.url.unwrap_or_else(|| config.backend.url.clone());

    if let Some(raw) = cli.send {
        let cmd: Command = raw.parse()?;
        tracing::info!("one-shot {} to {}", cmd, url);
        return connection::send_once(&url, cmd, Duration::from_millis(500)).await;
    }

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("mpv-remote log: {}", log_path.display());
    tracing::info!("mpv-remote starting, backend {}", url);

    let app = app::App::new(url, &config);
    app.run().await?;

    Ok(())
}
