//! Process-wide room registry.
//!
//! Rooms are created on first reference and never removed. Each room
//! sits behind its own `tokio::sync::Mutex`, so operations on
//! different rooms never contend with each other.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::connection::RoomId;
use crate::relay::EventSink;
use crate::room::Room;

/// Handle to a room's serialized state.
pub type SharedRoom<S> = Arc<Mutex<Room<S>>>;

/// Lazily-populated map of room id → room.
#[derive(Debug)]
pub struct RoomRegistry<S> {
    rooms: DashMap<RoomId, SharedRoom<S>>,
}

impl<S> Default for RoomRegistry<S> {
    fn default() -> Self {
        RoomRegistry {
            rooms: DashMap::new(),
        }
    }
}

impl<S: EventSink> RoomRegistry<S> {
    pub fn new() -> Self {
        RoomRegistry::default()
    }

    /// Look up a room, creating it if this is the first reference.
    ///
    /// Concurrent callers for the same unknown id all get the same room.
    pub fn get_or_create(&self, id: &RoomId) -> SharedRoom<S> {
        if let Some(room) = self.rooms.get(id) {
            return Arc::clone(room.value());
        }

        let entry = self.rooms.entry(id.clone()).or_insert_with(|| {
            info!("Created room {}", id);
            Arc::new(Mutex::new(Room::new(id.clone())))
        });
        Arc::clone(entry.value())
    }

    /// For tests or admin queries: look up an existing room.
    pub fn get(&self, id: &RoomId) -> Option<SharedRoom<S>> {
        self.rooms.get(id).map(|r| Arc::clone(r.value()))
    }

    /// For tests or admin queries: number of rooms ever referenced.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.rooms.iter().map(|r| r.key().clone()).collect();
        ids.sort();
        ids
    }
}
