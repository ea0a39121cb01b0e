//! Message types used by the room core.
//!
//! These are **transport-agnostic** logical events:
//! - [`ClientEvent`]: what a joined connection sends into its room.
//! - [`ServerEvent`]: what a room sends to its members.
//!
//! The JSON encoding lives in the `room-protocol` crate; this module
//! is purely logical.

use crate::role::Role;

/// An event sent by a connection after it has joined a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Change the display name of a player role.
    SetName(NameChange),

    /// A move attempt, relayed to the whole room without validation.
    Move(MoveEvent),
}

/// An event delivered to room members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// The role the receiving connection was given on join.
    PlayerAssignment(Role),

    /// The full name mapping of the room (never a delta).
    NameUpdate(NameMap),

    /// A move relayed from some member of the room.
    Move(MoveEvent),
}

/// Opaque move payload. The core never interprets `col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvent {
    pub col: i64,
}

/// Name-change request.
///
/// `player` is kept as the raw wire integer so that out-of-range
/// targets reach the directory and are rejected there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameChange {
    pub player: u8,
    pub name: String,
}

/// Display names of both player roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMap {
    pub player1: String,
    pub player2: String,
}

impl ServerEvent {
    /// Short event name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::PlayerAssignment(_) => "playerAssignment",
            ServerEvent::NameUpdate(_) => "nameUpdate",
            ServerEvent::Move(_) => "move",
        }
    }
}
