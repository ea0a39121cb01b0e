// crates/room-server/src/client.rs

//! Per-connection I/O.
//!
//! A connection goes through three phases:
//! 1. handshake: the first line names the room (`{"roomId": ...}`),
//! 2. joined: each further line is a client event routed to the room,
//!    while a writer task drains the room's events to the socket,
//! 3. disconnected: EOF or a read error frees the role.

use std::sync::Arc;

use anyhow::Result;
use room_core::{Connection, ConnectionId};
use room_protocol::wire_types::MAX_LINE_LEN;
use room_protocol::{decode_client_line, decode_handshake, encode_server};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{tcp::OwnedWriteHalf, TcpStream};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::hub::RoomHub;
use crate::types::OutboundRx;

/// Run the client I/O loop for a single connection.
pub async fn run_client(conn_id: ConnectionId, stream: TcpStream, hub: Arc<RoomHub>) -> Result<()> {
    let (read_half, write_half) = stream.into_split();
    let mut lines = LineReader::new(read_half);

    let first = match lines.next_line(conn_id).await? {
        Some(line) => line,
        None => {
            debug!("Connection {} closed before handshake", conn_id);
            return Ok(());
        }
    };

    let requested = match decode_handshake(&first) {
        Ok(room) => room,
        Err(e) => {
            warn!("Connection {} sent an invalid handshake: {}", conn_id, e);
            return Ok(());
        }
    };

    let room_id = hub.room_id_for(requested.as_deref());
    let (out_tx, out_rx) = mpsc::unbounded_channel();

    // Writer task: ends once the room drops our sender on leave.
    tokio::spawn(run_writer(conn_id, write_half, out_rx));

    let conn = hub.join(conn_id, room_id, out_tx).await;
    let result = run_reader(&conn, &mut lines, &hub).await;

    hub.leave(&conn).await;
    result
}

async fn run_reader<R: AsyncRead + Unpin>(
    conn: &Connection,
    lines: &mut LineReader<R>,
    hub: &RoomHub,
) -> Result<()> {
    while let Some(line) = lines.next_line(conn.id).await? {
        if line.is_empty() {
            continue;
        }

        match decode_client_line(&line) {
            Ok(event) => hub.dispatch(conn, event).await,
            Err(e) => warn!("Connection {} sent an invalid message: {}", conn.id, e),
        }
    }

    debug!("Connection {} reached EOF", conn.id);
    Ok(())
}

async fn run_writer(conn_id: ConnectionId, mut write_half: OwnedWriteHalf, mut out_rx: OutboundRx) {
    while let Some(event) = out_rx.recv().await {
        let line = match encode_server(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not encode {} for connection {}: {}", event.kind(), conn_id, e);
                continue;
            }
        };

        if let Err(e) = write_line(&mut write_half, &line).await {
            debug!("Connection {} write error: {}", conn_id, e);
            break;
        }
    }
}

async fn write_line(stream: &mut OwnedWriteHalf, line: &str) -> std::io::Result<()> {
    let data = format!("{}\n", line);
    stream.write_all(data.as_bytes()).await?;
    stream.flush().await
}

/// Newline framing over a byte stream.
///
/// Lines longer than [`MAX_LINE_LEN`] are discarded whole; a partial
/// line left at EOF is dropped.
struct LineReader<R> {
    inner: R,
    buffer: Vec<u8>,
    skipping: bool,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    fn new(inner: R) -> Self {
        LineReader {
            inner,
            buffer: Vec::new(),
            skipping: false,
        }
    }

    async fn next_line(&mut self, conn_id: ConnectionId) -> std::io::Result<Option<String>> {
        let mut temp_buf = [0u8; 1024];

        loop {
            if let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
                if std::mem::take(&mut self.skipping) {
                    continue;
                }
                return Ok(Some(String::from_utf8_lossy(&line).trim().to_string()));
            }

            if self.buffer.len() > MAX_LINE_LEN {
                if !self.skipping {
                    warn!("Connection {} sent an over-long line, discarding it", conn_id);
                }
                self.buffer.clear();
                self.skipping = true;
            }

            let n = self.inner.read(&mut temp_buf).await?;
            if n == 0 {
                return Ok(None);
            }
            self.buffer.extend_from_slice(&temp_buf[..n]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn splits_lines_and_trims() {
        let data: &[u8] = b"{\"roomId\":\"a\"}\r\n\n  move  \nleftover";
        let mut reader = LineReader::new(data);
        let id = ConnectionId(1);

        assert_eq!(reader.next_line(id).await.unwrap().as_deref(), Some("{\"roomId\":\"a\"}"));
        assert_eq!(reader.next_line(id).await.unwrap().as_deref(), Some(""));
        assert_eq!(reader.next_line(id).await.unwrap().as_deref(), Some("move"));
        assert_eq!(reader.next_line(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn over_long_line_is_skipped() {
        let mut data = vec![b'x'; MAX_LINE_LEN * 2];
        data.extend_from_slice(b"\nnext\n");
        let mut reader = LineReader::new(data.as_slice());
        let id = ConnectionId(1);

        assert_eq!(reader.next_line(id).await.unwrap().as_deref(), Some("next"));
        assert_eq!(reader.next_line(id).await.unwrap(), None);
    }
}
