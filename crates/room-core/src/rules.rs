//! Hook for an external rule engine.
//!
//! The core relays moves without understanding them. A rule engine
//! observes each relayed move together with the sender's role and may
//! judge legality or detect a win on its own; it cannot feed anything
//! back into the room.

use crate::connection::RoomId;
use crate::messages::MoveEvent;
use crate::role::Role;

/// One-way consumer of relayed moves.
pub trait RuleEngine: Send + Sync {
    fn observe_move(&self, room: &RoomId, sender: Role, mv: MoveEvent);
}

/// Rule engine that ignores every move.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRules;

impl RuleEngine for NoRules {
    fn observe_move(&self, _room: &RoomId, _sender: Role, _mv: MoveEvent) {}
}
