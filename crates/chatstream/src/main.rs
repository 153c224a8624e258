mod cli;
mod tui;

use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chatstream_core::ai::HttpTransport;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file: the TUI owns the terminal
    let log_path = cli.log_path();
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatstream=info,chatstream_core=info".into()),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .init();

    let config = cli.resolve_config()?;
    tracing::info!(base_url = %config.base_url, "Starting chatstream");

    let transport = HttpTransport::new(&config).context("Failed to set up HTTP client")?;
    tui::run(&config, Arc::new(transport)).await
}
