//! Room server binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use room_server::config::Config;
use room_server::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "room-server")]
#[clap(about = "Two-player rooms with live spectators over TCP")]
struct Cli {
    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[clap(short, long)]
    bind: Option<String>,

    /// Port to listen on
    #[clap(short, long)]
    port: Option<u16>,

    /// Maximum simultaneous connections
    #[clap(short, long)]
    max_clients: Option<usize>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(max_clients) = cli.max_clients {
        config.max_clients = max_clients;
    }

    info!(
        "Starting room-server on {} (max_clients = {}, default room = {:?})",
        config.socket_addr_string(),
        config.max_clients,
        config.default_room
    );

    server::run(config).await
}
