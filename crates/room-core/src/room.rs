//! State of a single room.
//!
//! A [`Room`] bundles the role slots, the name directory and the relay
//! targets of one game instance. Every method takes `&mut self`; the
//! registry wraps each room in its own mutex so that join, rename,
//! move relay and leave never interleave within a room.

use tracing::{debug, info};

use crate::connection::{Connection, ConnectionId, RoomId};
use crate::error::RoomError;
use crate::messages::{ClientEvent, MoveEvent, NameChange, ServerEvent};
use crate::names::NameDirectory;
use crate::relay::{EventSink, Relay};
use crate::role::Role;
use crate::slots::RoleSlots;

/// One isolated game instance.
#[derive(Debug)]
pub struct Room<S> {
    id: RoomId,
    slots: RoleSlots,
    names: NameDirectory,
    relay: Relay<S>,
}

impl<S: EventSink> Room<S> {
    pub fn new(id: RoomId) -> Self {
        Room {
            id,
            slots: RoleSlots::new(),
            names: NameDirectory::new(),
            relay: Relay::new(),
        }
    }

    /// Admit a new connection.
    ///
    /// Assigns a role, registers `sink` as a relay target, then sends
    /// the new member its `PlayerAssignment` followed by a snapshot of
    /// the current names.
    pub fn join(&mut self, conn: ConnectionId, sink: S) -> Connection {
        let role = self.slots.assign(conn);
        self.relay.add(conn, sink);

        info!("Assigned {} to connection {} in room {}", role, conn, self.id);

        self.relay.send_to(conn, ServerEvent::PlayerAssignment(role));
        self.relay
            .send_to(conn, ServerEvent::NameUpdate(self.names.snapshot()));

        Connection::new(conn, self.id.clone(), role)
    }

    /// Apply one client event from a joined connection.
    pub fn handle_event(&mut self, conn: &Connection, event: ClientEvent) -> Result<(), RoomError> {
        match event {
            ClientEvent::SetName(change) => self.set_name(conn, change),
            ClientEvent::Move(mv) => {
                self.relay_move(conn, mv);
                Ok(())
            }
        }
    }

    /// Rename a player role and broadcast the full mapping.
    ///
    /// On rejection nothing changes and nothing is sent.
    pub fn set_name(&mut self, conn: &Connection, change: NameChange) -> Result<(), RoomError> {
        let NameChange { player, name } = change;
        self.names.set(conn.role, player, name)?;

        info!(
            "Room {}: player {} set name to {:?}",
            self.id,
            player,
            self.names.get(conn.role).unwrap_or_default()
        );

        self.relay
            .broadcast(&ServerEvent::NameUpdate(self.names.snapshot()));
        Ok(())
    }

    /// Relay a move to every member, the sender included.
    ///
    /// No turn or role check happens here. Returns the number of members
    /// the move was delivered to.
    pub fn relay_move(&mut self, conn: &Connection, mv: MoveEvent) -> usize {
        let delivered = self.relay.broadcast(&ServerEvent::Move(mv));
        debug!(
            "Room {}: move col={} from {} ({}) relayed to {} members",
            self.id, mv.col, conn.id, conn.role, delivered
        );
        delivered
    }

    /// Drop a connection from the room, freeing its player role if any.
    pub fn leave(&mut self, conn: ConnectionId) -> Option<Role> {
        self.relay.remove(conn);
        let freed = self.slots.release(conn);
        if let Some(role) = freed {
            info!("Room {}: freed {} slot", self.id, role);
        }
        if self.relay.is_empty() {
            debug!("Room {} has no members left", self.id);
        }
        freed
    }

    pub fn slots(&self) -> &RoleSlots {
        &self.slots
    }

    pub fn names(&self) -> &NameDirectory {
        &self.names
    }

    pub fn member_count(&self) -> usize {
        self.relay.len()
    }

    pub fn is_member(&self, conn: ConnectionId) -> bool {
        self.relay.contains(conn)
    }
}
