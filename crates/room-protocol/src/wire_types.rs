//! Low-level wire types and constants.
//!
//! Every message is one line of JSON:
//!
//! ```text
//! {"event": "<name>", "data": <payload>}\n
//! ```
//!
//! except the very first line a client sends, which is the bare
//! handshake object `{"roomId": "<room>"}`.
//!
//! The actual encode/decode logic lives in `json_codec`.

use serde::{Deserialize, Serialize};

/// Longest line (excluding the newline) either side will accept.
pub const MAX_LINE_LEN: usize = 8 * 1024;

/// Events a client may send after the handshake.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WireClientEvent {
    /// `{ "player": 1|2, "name": string }`
    SetName,

    /// `{ "col": integer }`
    Move,
}

impl WireClientEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            WireClientEvent::SetName => "setName",
            WireClientEvent::Move => "move",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "setName" => Some(WireClientEvent::SetName),
            "move" => Some(WireClientEvent::Move),
            _ => None,
        }
    }
}

/// Events the server sends.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WireServerEvent {
    /// `{ "player": 0|1|2 }`
    PlayerAssignment,

    /// `{ "1": string, "2": string }`
    NameUpdate,

    /// `{ "col": integer }`
    Move,
}

impl WireServerEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            WireServerEvent::PlayerAssignment => "playerAssignment",
            WireServerEvent::NameUpdate => "nameUpdate",
            WireServerEvent::Move => "move",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "playerAssignment" => Some(WireServerEvent::PlayerAssignment),
            "nameUpdate" => Some(WireServerEvent::NameUpdate),
            "move" => Some(WireServerEvent::Move),
            _ => None,
        }
    }
}

/// Outgoing envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T> {
    pub event: &'a str,
    pub data: T,
}

/// Incoming envelope; the payload is decoded once the event name is known.
#[derive(Debug, Deserialize)]
pub struct RawEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// First line of every connection.
///
/// Unknown keys are refused so that an event line sent in place of the
/// handshake is not mistaken for a join to the default room.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Handshake {
    #[serde(rename = "roomId", default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerPayload {
    pub player: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetNamePayload {
    pub player: u8,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovePayload {
    pub col: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NamesPayload {
    #[serde(rename = "1")]
    pub player1: String,
    #[serde(rename = "2")]
    pub player2: String,
}
