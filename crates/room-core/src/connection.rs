//! Connection and room identity.

use crate::role::Role;

/// Room used when a client does not name one.
pub const DEFAULT_ROOM: &str = "default";

/// Identifier for a live connection.
///
/// Unique over the lifetime of the process; a reconnecting human
/// always gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque, caller-chosen room key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    /// Build a room id, mapping a missing or empty key to [`DEFAULT_ROOM`].
    pub fn new(raw: Option<&str>) -> Self {
        Self::with_default(raw, DEFAULT_ROOM)
    }

    /// Same as [`RoomId::new`] with a caller-supplied fallback room.
    pub fn with_default(raw: Option<&str>, fallback: &str) -> Self {
        match raw {
            Some(s) if !s.is_empty() => RoomId(s.to_string()),
            _ => RoomId(fallback.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        RoomId(DEFAULT_ROOM.to_string())
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        RoomId::new(Some(s))
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A connection that has joined a room.
///
/// Room and role are fixed at join time; there is no mid-session
/// room switching and no role change. Dropping out of a room goes
/// through [`crate::Room::leave`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub room_id: RoomId,
    pub role: Role,
}

impl Connection {
    pub fn new(id: ConnectionId, room_id: RoomId, role: Role) -> Self {
        Connection { id, room_id, role }
    }
}
