//! Room-scoped event fan-out.
//!
//! A [`Relay`] holds the outbound sink of every connection joined to
//! one room. Delivery is best-effort: a sink that fails is logged and
//! skipped, the remaining members still receive the event, and the
//! caller never sees the failure. Sinks are expected to be
//! non-blocking (an unbounded channel into the connection's writer
//! task), so events pushed while the room lock is held reach every
//! member in the order they were broadcast.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::connection::ConnectionId;
use crate::error::DeliveryError;
use crate::messages::ServerEvent;

/// Outbound side of one connection.
pub trait EventSink {
    fn deliver(&self, event: ServerEvent) -> Result<(), DeliveryError>;
}

impl EventSink for mpsc::UnboundedSender<ServerEvent> {
    fn deliver(&self, event: ServerEvent) -> Result<(), DeliveryError> {
        self.send(event).map_err(|_| DeliveryError)
    }
}

/// Members of a room and their sinks.
#[derive(Debug)]
pub struct Relay<S> {
    members: BTreeMap<ConnectionId, S>,
}

impl<S> Default for Relay<S> {
    fn default() -> Self {
        Relay {
            members: BTreeMap::new(),
        }
    }
}

impl<S: EventSink> Relay<S> {
    pub fn new() -> Self {
        Relay::default()
    }

    pub fn add(&mut self, conn: ConnectionId, sink: S) {
        self.members.insert(conn, sink);
    }

    pub fn remove(&mut self, conn: ConnectionId) -> Option<S> {
        self.members.remove(&conn)
    }

    pub fn contains(&self, conn: ConnectionId) -> bool {
        self.members.contains_key(&conn)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Unicast to one member. Unknown members are ignored.
    pub fn send_to(&self, conn: ConnectionId, event: ServerEvent) -> bool {
        match self.members.get(&conn) {
            Some(sink) => deliver_logged(conn, sink, event),
            None => {
                debug!("No relay member {} for {}", conn, event.kind());
                false
            }
        }
    }

    /// Deliver `event` to every member. Returns how many deliveries succeeded.
    pub fn broadcast(&self, event: &ServerEvent) -> usize {
        let mut delivered = 0;
        for (conn, sink) in &self.members {
            if deliver_logged(*conn, sink, event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }
}

fn deliver_logged<S: EventSink>(conn: ConnectionId, sink: &S, event: ServerEvent) -> bool {
    let kind = event.kind();
    match sink.deliver(event) {
        Ok(()) => true,
        Err(e) => {
            warn!("Dropping {} for connection {}: {}", kind, conn, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MoveEvent;

    #[test]
    fn broadcast_reaches_every_member_in_order() {
        let mut relay = Relay::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        relay.add(ConnectionId(1), tx_a);
        relay.add(ConnectionId(2), tx_b);

        for col in 0..3 {
            assert_eq!(relay.broadcast(&ServerEvent::Move(MoveEvent { col })), 2);
        }

        for rx in [&mut rx_a, &mut rx_b] {
            for col in 0..3 {
                assert_eq!(rx.try_recv().unwrap(), ServerEvent::Move(MoveEvent { col }));
            }
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn dead_member_does_not_block_the_rest() {
        let mut relay = Relay::new();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        relay.add(ConnectionId(1), tx_dead);
        relay.add(ConnectionId(2), tx_live);
        drop(rx_dead);

        let delivered = relay.broadcast(&ServerEvent::Move(MoveEvent { col: 4 }));

        assert_eq!(delivered, 1);
        assert_eq!(
            rx_live.try_recv().unwrap(),
            ServerEvent::Move(MoveEvent { col: 4 })
        );
    }

    #[test]
    fn removing_the_last_member_empties_the_relay() {
        let mut relay = Relay::new();
        let (tx, _rx) = mpsc::unbounded_channel::<ServerEvent>();
        assert!(relay.is_empty());

        relay.add(ConnectionId(7), tx);
        assert!(!relay.is_empty());
        assert!(relay.remove(ConnectionId(7)).is_some());
        assert!(relay.is_empty());
        assert!(relay.remove(ConnectionId(7)).is_none());
    }

    #[test]
    fn unicast_only_hits_the_target() {
        let mut relay = Relay::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        relay.add(ConnectionId(1), tx_a);
        relay.add(ConnectionId(2), tx_b);

        assert!(relay.send_to(ConnectionId(2), ServerEvent::Move(MoveEvent { col: 0 })));
        assert!(!relay.send_to(ConnectionId(3), ServerEvent::Move(MoveEvent { col: 0 })));

        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_ok());
    }
}
