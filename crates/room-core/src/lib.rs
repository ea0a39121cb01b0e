//! room-core
//!
//! Pure room coordination logic:
//! - roles and connection identity
//! - logical client/server events
//! - role slots (assignment and reclamation)
//! - per-room display-name directory
//! - per-room event relay
//! - room state and the process-wide room registry

pub mod role;
pub mod connection;
pub mod messages;
pub mod slots;
pub mod names;
pub mod relay;
pub mod room;
pub mod registry;
pub mod rules;
pub mod error;

pub use role::Role;
pub use connection::{Connection, ConnectionId, RoomId, DEFAULT_ROOM};

pub use messages::{ClientEvent, MoveEvent, NameChange, NameMap, ServerEvent};

pub use slots::RoleSlots;
pub use names::NameDirectory;
pub use relay::{EventSink, Relay};
pub use room::Room;
pub use registry::{RoomRegistry, SharedRoom};
pub use rules::{NoRules, RuleEngine};
pub use error::{DeliveryError, RoomError};
