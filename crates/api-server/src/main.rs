use clap::Parser;
use common::config::Config;
use events_server::{run_server_blocking, AppState};
use std::path::PathBuf;

/// In-memory events backend for local Playbill runs
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to bind (defaults to the config file's server.host)
    #[arg(long, env = "PLAYBILL_HOST")]
    host: Option<String>,

    /// Port to listen on (defaults to the config file's server.port)
    #[arg(long, env = "PLAYBILL_PORT")]
    port: Option<u16>,

    /// json-server style seed file: {"events": [...]}
    #[arg(long)]
    data: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);

    let state = match &args.data {
        Some(path) => AppState::from_seed_file(path)?,
        None => AppState::default(),
    };

    run_server_blocking(state, &host, port).await
}
