//! Connection lifecycle across rooms.
//!
//! The hub ties each connection to its room: it resolves the room id,
//! admits the connection (role + snapshot), routes the connection's
//! events into the room, and frees the role when the transport reports
//! the connection gone. Every step runs under the room's own lock, so
//! a join can never claim a role that a concurrent leave has not yet
//! released.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use room_core::{ClientEvent, Connection, ConnectionId, NoRules, Role, RoomId, RuleEngine};
use tracing::{debug, info};

use crate::types::{OutboundTx, Registry, ServerRoom};

/// Process-wide view of rooms and live connections.
pub struct RoomHub {
    registry: Registry,
    rules: Arc<dyn RuleEngine>,
    default_room: String,
    live: AtomicUsize,
}

impl RoomHub {
    /// Hub with no rule engine attached.
    pub fn new(default_room: impl Into<String>) -> Self {
        RoomHub::with_rules(default_room, Arc::new(NoRules))
    }

    pub fn with_rules(default_room: impl Into<String>, rules: Arc<dyn RuleEngine>) -> Self {
        RoomHub {
            registry: Registry::new(),
            rules,
            default_room: default_room.into(),
            live: AtomicUsize::new(0),
        }
    }

    /// Resolve the room a handshake asked for.
    pub fn room_id_for(&self, requested: Option<&str>) -> RoomId {
        RoomId::with_default(requested, &self.default_room)
    }

    /// Admit a connection to `room_id`; its first two outbound events
    /// are its role and the current names.
    pub async fn join(&self, conn_id: ConnectionId, room_id: RoomId, out_tx: OutboundTx) -> Connection {
        let room = self.registry.get_or_create(&room_id);
        let conn = room.lock().await.join(conn_id, out_tx);
        info!(
            "Connection {} joined room {} as {}",
            conn.id, conn.room_id, conn.role
        );
        conn
    }

    /// Apply one event from a joined connection.
    ///
    /// Rejected commands are dropped without telling the sender.
    pub async fn dispatch(&self, conn: &Connection, event: ClientEvent) {
        let room = self.registry.get_or_create(&conn.room_id);
        let mut room = room.lock().await;

        let observed_move = match &event {
            ClientEvent::Move(mv) => Some(*mv),
            ClientEvent::SetName(_) => None,
        };

        match room.handle_event(conn, event) {
            Ok(()) => {
                if let Some(mv) = observed_move {
                    self.rules.observe_move(&conn.room_id, conn.role, mv);
                }
            }
            Err(e) => {
                debug!(
                    "Rejected command from connection {} in room {}: {}",
                    conn.id, conn.room_id, e
                );
            }
        }
    }

    /// Remove a connection from its room, freeing its role.
    pub async fn leave(&self, conn: &Connection) -> Option<Role> {
        let room = self.registry.get_or_create(&conn.room_id);
        let freed = room.lock().await.leave(conn.id);
        info!("Connection {} left room {}", conn.id, conn.room_id);
        freed
    }

    /// For tests or admin queries: look up a room without creating it.
    pub fn room(&self, room_id: &RoomId) -> Option<ServerRoom> {
        self.registry.get(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.registry.len()
    }

    /// Count a newly accepted socket. Returns the new total.
    pub fn connection_opened(&self) -> usize {
        self.live.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn connection_closed(&self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn live_connections(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use room_core::{MoveEvent, NameChange, ServerEvent};
    use tokio::sync::mpsc;

    use super::*;

    #[derive(Default)]
    struct RecordingRules {
        seen: Mutex<Vec<(String, Role, i64)>>,
    }

    impl RuleEngine for RecordingRules {
        fn observe_move(&self, room: &RoomId, sender: Role, mv: MoveEvent) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((room.to_string(), sender, mv.col));
            }
        }
    }

    #[tokio::test]
    async fn moves_reach_the_rule_engine_with_sender_role() {
        let rules = Arc::new(RecordingRules::default());
        let hub = RoomHub::with_rules("default", rules.clone());

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();
        let room_id = hub.room_id_for(Some("g"));
        let c1 = hub.join(ConnectionId(1), room_id.clone(), tx1).await;
        let _c2 = hub.join(ConnectionId(2), room_id.clone(), tx2).await;
        let c3 = hub.join(ConnectionId(3), room_id, tx3).await;

        hub.dispatch(&c1, ClientEvent::Move(MoveEvent { col: 2 })).await;
        hub.dispatch(&c3, ClientEvent::Move(MoveEvent { col: 5 })).await;
        hub.dispatch(
            &c1,
            ClientEvent::SetName(NameChange {
                player: 1,
                name: "Ann".into(),
            }),
        )
        .await;

        let seen = rules.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                ("g".to_string(), Role::Player1, 2),
                ("g".to_string(), Role::Spectator, 5),
            ]
        );
    }

    #[tokio::test]
    async fn missing_room_uses_configured_default() {
        let hub = RoomHub::new("lobby");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = hub.join(ConnectionId(9), hub.room_id_for(None), tx).await;

        assert_eq!(conn.room_id.as_str(), "lobby");
        assert_eq!(rx.recv().await, Some(ServerEvent::PlayerAssignment(Role::Player1)));
        assert!(hub.room(&RoomId::from("lobby")).is_some());
        assert_eq!(hub.room_count(), 1);
    }

    #[tokio::test]
    async fn leave_frees_the_role_for_the_next_join() {
        let hub = RoomHub::new("default");
        let room_id = hub.room_id_for(Some("x"));
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let c1 = hub.join(ConnectionId(1), room_id.clone(), tx1).await;

        assert_eq!(hub.leave(&c1).await, Some(Role::Player1));

        let (tx2, _rx2) = mpsc::unbounded_channel();
        let c2 = hub.join(ConnectionId(2), room_id, tx2).await;
        assert_eq!(c2.role, Role::Player1);
    }

    #[test]
    fn live_connection_counter() {
        let hub = RoomHub::new("default");
        assert_eq!(hub.connection_opened(), 1);
        assert_eq!(hub.connection_opened(), 2);
        hub.connection_closed();
        assert_eq!(hub.live_connections(), 1);
    }
}
