//! Role (Spectator / Player 1 / Player 2) held by a connection.

/// Role assigned to a connection when it joins a room.
///
/// The two player roles are exclusive per room; any number of
/// connections may be spectators. On the wire a role is the integer
/// `0`, `1` or `2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Spectator,
    Player1,
    Player2,
}

impl Role {
    /// The exclusive roles, in the order they are handed out.
    pub const PLAYERS: [Role; 2] = [Role::Player1, Role::Player2];

    /// Wire representation (`0` / `1` / `2`).
    pub fn as_u8(self) -> u8 {
        match self {
            Role::Spectator => 0,
            Role::Player1 => 1,
            Role::Player2 => 2,
        }
    }

    /// Parse the wire representation. Anything outside `0..=2` is `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Role::Spectator),
            1 => Some(Role::Player1),
            2 => Some(Role::Player2),
            _ => None,
        }
    }

    pub fn is_player(self) -> bool {
        !matches!(self, Role::Spectator)
    }

    /// Index into per-player arrays; `None` for spectators.
    pub(crate) fn slot_index(self) -> Option<usize> {
        match self {
            Role::Spectator => None,
            Role::Player1 => Some(0),
            Role::Player2 => Some(1),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Spectator => f.write_str("spectator"),
            Role::Player1 => f.write_str("player 1"),
            Role::Player2 => f.write_str("player 2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        for role in [Role::Spectator, Role::Player1, Role::Player2] {
            assert_eq!(Role::from_u8(role.as_u8()), Some(role));
        }
        assert_eq!(Role::from_u8(3), None);
    }

    #[test]
    fn only_numbered_roles_are_players() {
        assert!(!Role::Spectator.is_player());
        assert!(Role::PLAYERS.iter().all(|r| r.is_player()));
    }
}
