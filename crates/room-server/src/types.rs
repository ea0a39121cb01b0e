//! Shared types for the room TCP server.
//!
//! This module defines:
//! - channel aliases between a room and a connection's writer task
//! - the concrete room registry type used by the server

use room_core::{RoomRegistry, ServerEvent, SharedRoom};
use tokio::sync::mpsc;

/// Outbound events from a room to a given connection.
pub type OutboundTx = mpsc::UnboundedSender<ServerEvent>;
pub type OutboundRx = mpsc::UnboundedReceiver<ServerEvent>;

/// Registry of rooms whose relay targets are outbound channels.
pub type Registry = RoomRegistry<OutboundTx>;

/// One room as stored in [`Registry`].
pub type ServerRoom = SharedRoom<OutboundTx>;
