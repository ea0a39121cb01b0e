//! Error types for the room core.
//!
//! Nothing here is ever surfaced to a client: rejected commands are
//! dropped by the caller and delivery failures are logged.

use thiserror::Error;

use crate::role::Role;

/// A client command the room refused to apply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    /// The requester does not hold the role it tried to act for.
    #[error("connection holding {held} may not act for {target}")]
    NotRoleOwner { held: Role, target: Role },

    /// The target is not one of the player roles.
    #[error("{0} is not a nameable role")]
    InvalidRole(u8),
}

/// The outbound side of a connection is gone.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("outbound channel closed")]
pub struct DeliveryError;
