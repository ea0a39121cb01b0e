//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Accepts new TCP connections, up to `max_clients` at once.
//! - Assigns each connection a `ConnectionId`.
//! - Spawns a per-connection task that handles the handshake, the
//!   room events and the disconnect.
//!
//! The per-connection logic lives in `client`, the room lifecycle in
//! `hub`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use room_core::ConnectionId;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::client;
use crate::config::Config;
use crate::hub::RoomHub;

/// Global-ish counter for assigning unique `ConnectionId`s.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

fn next_connection_id() -> ConnectionId {
    ConnectionId(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
}

/// Bind the listener described by `config`.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr = config.socket_addr_string();
    TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))
}

/// Run the TCP server with the given configuration.
pub async fn run(config: Config) -> Result<()> {
    let listener = bind(&config).await?;
    let hub = Arc::new(RoomHub::new(config.default_room.clone()));
    serve(listener, hub, config.max_clients).await
}

/// Accept connections on `listener` forever.
pub async fn serve(listener: TcpListener, hub: Arc<RoomHub>, max_clients: usize) -> Result<()> {
    let local: SocketAddr = listener.local_addr()?;
    info!("Listening on {}", local);

    loop {
        let (stream, peer_addr) = listener.accept().await?;

        if hub.live_connections() >= max_clients {
            warn!(
                "Rejecting connection from {}: max_clients ({}) reached",
                peer_addr, max_clients
            );
            // Just drop the stream; client will see connection closed.
            continue;
        }

        let conn_id = next_connection_id();
        let live = hub.connection_opened();
        info!("Accepted connection {} from {} ({} live)", conn_id, peer_addr, live);

        if let Err(e) = stream.set_nodelay(true) {
            warn!("Connection {}: could not set TCP_NODELAY: {}", conn_id, e);
        }

        let hub = Arc::clone(&hub);
        tokio::spawn(async move {
            if let Err(e) = client::run_client(conn_id, stream, Arc::clone(&hub)).await {
                warn!("Connection {} error: {:#}", conn_id, e);
            }
            hub.connection_closed();
            info!("Connection {} disconnected", conn_id);
        });
    }
}
