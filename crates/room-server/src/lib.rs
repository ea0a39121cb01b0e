//! room-server
//!
//! Multi-room async TCP server: players and spectators join rooms by
//! id and receive every room event in order.

pub mod config;
pub mod types;
pub mod hub;
pub mod server;

// internal module, not re-exported
mod client;
