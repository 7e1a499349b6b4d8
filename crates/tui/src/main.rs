//! Playbill TUI - browse and add opera/ballet events
//!
//! This is the main entry point for the TUI application.
//! It loads the config, initializes the terminal, fetches the event list
//! and runs the app.

mod app;
mod form;
mod store;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use common::config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use events_client::EventsClient;
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "playbill", version, about = "Browse and add opera and ballet events")]
struct Args {
    /// Events collection URL (overrides the config file)
    #[arg(long, env = "PLAYBILL_API_URL")]
    api_url: Option<String>,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (overrides the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Log to a file, since the terminal belongs to the UI
    let log_path = args.log_file.unwrap_or_else(|| config.log.file_or_default());
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    if args.config.is_none() && Config::default_path().is_err() {
        tracing::warn!("No config directory available, using default settings");
    }

    let base_url = args.api_url.unwrap_or(config.api.base_url);
    let client = EventsClient::new(&base_url)?;
    let backend_url = client.base_url().to_string();
    tracing::info!("Using events backend at {}", backend_url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app, fetch the initial list and run
    let mut app = App::new(Box::new(client), backend_url);
    app.load_events().await;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}
