//! Per-room display-name directory.

use crate::error::RoomError;
use crate::messages::NameMap;
use crate::role::Role;

/// Display names of the two player roles, defaulting to
/// `"Player 1"` / `"Player 2"`. Last write wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDirectory {
    names: [String; 2],
}

impl Default for NameDirectory {
    fn default() -> Self {
        NameDirectory {
            names: ["Player 1".to_string(), "Player 2".to_string()],
        }
    }
}

impl NameDirectory {
    pub fn new() -> Self {
        NameDirectory::default()
    }

    /// Set the name of `target` on behalf of a connection holding `requester`.
    ///
    /// Only the holder of a player role may rename that role.
    pub fn set(&mut self, requester: Role, target: u8, name: String) -> Result<(), RoomError> {
        let target_role = Role::from_u8(target)
            .filter(|r| r.is_player())
            .ok_or(RoomError::InvalidRole(target))?;

        if requester != target_role {
            return Err(RoomError::NotRoleOwner {
                held: requester,
                target: target_role,
            });
        }

        if let Some(idx) = target_role.slot_index() {
            self.names[idx] = name;
        }
        Ok(())
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        role.slot_index().map(|idx| self.names[idx].as_str())
    }

    /// Full mapping, as sent to clients.
    pub fn snapshot(&self) -> NameMap {
        NameMap {
            player1: self.names[0].clone(),
            player2: self.names[1].clone(),
        }
    }
}
