//! Exclusive player slots of a room.

use crate::connection::ConnectionId;
use crate::role::Role;

/// Owners of the two player roles of a room.
///
/// Callers must hold the room lock around [`RoleSlots::assign`] and
/// [`RoleSlots::release`]; the check-then-claim and check-then-clear
/// sequences are not atomic on their own.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleSlots {
    owners: [Option<ConnectionId>; 2],
}

impl RoleSlots {
    pub fn new() -> Self {
        RoleSlots::default()
    }

    /// Claim the first free player role for `conn`, role 1 first.
    /// Returns [`Role::Spectator`] when both are taken.
    pub fn assign(&mut self, conn: ConnectionId) -> Role {
        for role in Role::PLAYERS {
            let Some(idx) = role.slot_index() else {
                continue;
            };
            if self.owners[idx].is_none() {
                self.owners[idx] = Some(conn);
                return role;
            }
        }
        Role::Spectator
    }

    /// Free whichever role `conn` owns. `None` if it owned none.
    pub fn release(&mut self, conn: ConnectionId) -> Option<Role> {
        for role in Role::PLAYERS {
            let Some(idx) = role.slot_index() else {
                continue;
            };
            if self.owners[idx] == Some(conn) {
                self.owners[idx] = None;
                return Some(role);
            }
        }
        None
    }

    /// Current owner of `role`. Always `None` for spectators.
    pub fn owner(&self, role: Role) -> Option<ConnectionId> {
        role.slot_index().and_then(|idx| self.owners[idx])
    }

    pub fn is_full(&self) -> bool {
        self.owners.iter().all(Option::is_some)
    }
}
