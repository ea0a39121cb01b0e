//! JSON line encoding/decoding for room events.
//!
//! This module converts between:
//! - single lines of text (no trailing newline)
//! - high-level `room_core::ClientEvent` / `ServerEvent`
//!
//! Framing is the caller's job: a TCP stream server splits on `\n`
//! and feeds each line here, and appends `\n` to each encoded line.

use room_core::{ClientEvent, MoveEvent, NameChange, NameMap, Role, ServerEvent};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::wire_types::{
    Envelope, Handshake, MovePayload, NamesPayload, PlayerPayload, RawEnvelope, SetNamePayload,
    WireClientEvent, WireServerEvent, MAX_LINE_LEN,
};

/// Errors that can arise when encoding/decoding a line.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not JSON, or a payload of the wrong shape.
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed envelope with an event name we do not handle.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// Semantically invalid field value.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// Line exceeds [`MAX_LINE_LEN`].
    #[error("line of {0} bytes exceeds the line length limit")]
    LineTooLong(usize),
}

// ============================================================================
// Handshake
// ============================================================================

/// Decode the first line of a connection.
///
/// Returns the requested room, or `None` when the client left it out
/// (or sent `null`, or a blank line) and the default room applies.
pub fn decode_handshake(line: &str) -> Result<Option<String>, ProtocolError> {
    let line = checked(line)?;
    if line.is_empty() {
        return Ok(None);
    }
    let hs: Handshake = serde_json::from_str(line)?;
    Ok(hs.room_id.filter(|id| !id.is_empty()))
}

pub fn encode_handshake(room_id: Option<&str>) -> Result<String, ProtocolError> {
    let hs = Handshake {
        room_id: room_id.map(str::to_string),
    };
    Ok(serde_json::to_string(&hs)?)
}

// ============================================================================
// Client → server
// ============================================================================

/// Decode one client line into a `ClientEvent`.
pub fn decode_client_line(line: &str) -> Result<ClientEvent, ProtocolError> {
    let env: RawEnvelope = serde_json::from_str(checked(line)?)?;

    let kind = WireClientEvent::from_name(&env.event)
        .ok_or_else(|| ProtocolError::UnknownEvent(env.event.clone()))?;

    match kind {
        WireClientEvent::SetName => {
            let p: SetNamePayload = payload(env.data)?;
            Ok(ClientEvent::SetName(NameChange {
                player: p.player,
                name: p.name,
            }))
        }
        WireClientEvent::Move => {
            let p: MovePayload = payload(env.data)?;
            Ok(ClientEvent::Move(MoveEvent { col: p.col }))
        }
    }
}

/// Encode a `ClientEvent` as one line (no newline).
pub fn encode_client(event: &ClientEvent) -> Result<String, ProtocolError> {
    let line = match event {
        ClientEvent::SetName(change) => serde_json::to_string(&Envelope {
            event: WireClientEvent::SetName.as_str(),
            data: SetNamePayload {
                player: change.player,
                name: change.name.clone(),
            },
        })?,
        ClientEvent::Move(mv) => serde_json::to_string(&Envelope {
            event: WireClientEvent::Move.as_str(),
            data: MovePayload { col: mv.col },
        })?,
    };
    Ok(line)
}

// ============================================================================
// Server → client
// ============================================================================

/// Encode a `ServerEvent` as one line (no newline).
pub fn encode_server(event: &ServerEvent) -> Result<String, ProtocolError> {
    let line = match event {
        ServerEvent::PlayerAssignment(role) => serde_json::to_string(&Envelope {
            event: WireServerEvent::PlayerAssignment.as_str(),
            data: PlayerPayload {
                player: role.as_u8(),
            },
        })?,
        ServerEvent::NameUpdate(names) => serde_json::to_string(&Envelope {
            event: WireServerEvent::NameUpdate.as_str(),
            data: NamesPayload {
                player1: names.player1.clone(),
                player2: names.player2.clone(),
            },
        })?,
        ServerEvent::Move(mv) => serde_json::to_string(&Envelope {
            event: WireServerEvent::Move.as_str(),
            data: MovePayload { col: mv.col },
        })?,
    };
    Ok(line)
}

/// Decode one server line into a `ServerEvent`.
pub fn decode_server_line(line: &str) -> Result<ServerEvent, ProtocolError> {
    let env: RawEnvelope = serde_json::from_str(checked(line)?)?;

    let kind = WireServerEvent::from_name(&env.event)
        .ok_or_else(|| ProtocolError::UnknownEvent(env.event.clone()))?;

    match kind {
        WireServerEvent::PlayerAssignment => {
            let p: PlayerPayload = payload(env.data)?;
            let role = Role::from_u8(p.player).ok_or(ProtocolError::InvalidField("player"))?;
            Ok(ServerEvent::PlayerAssignment(role))
        }
        WireServerEvent::NameUpdate => {
            let p: NamesPayload = payload(env.data)?;
            Ok(ServerEvent::NameUpdate(NameMap {
                player1: p.player1,
                player2: p.player2,
            }))
        }
        WireServerEvent::Move => {
            let p: MovePayload = payload(env.data)?;
            Ok(ServerEvent::Move(MoveEvent { col: p.col }))
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn checked(line: &str) -> Result<&str, ProtocolError> {
    if line.len() > MAX_LINE_LEN {
        return Err(ProtocolError::LineTooLong(line.len()));
    }
    Ok(line.trim())
}

fn payload<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, ProtocolError> {
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_variants() {
        assert_eq!(decode_handshake(r#"{"roomId":"abc"}"#).unwrap(), Some("abc".into()));
        assert_eq!(decode_handshake("{}").unwrap(), None);
        assert_eq!(decode_handshake(r#"{"roomId":null}"#).unwrap(), None);
        assert_eq!(decode_handshake(r#"{"roomId":""}"#).unwrap(), None);
        assert_eq!(decode_handshake("   ").unwrap(), None);
        assert!(decode_handshake("room=abc").is_err());

        let line = encode_handshake(Some("abc")).unwrap();
        assert_eq!(line, r#"{"roomId":"abc"}"#);
        assert_eq!(encode_handshake(None).unwrap(), "{}");
    }

    #[test]
    fn event_line_is_not_a_handshake() {
        assert!(matches!(
            decode_handshake(r#"{"event":"move","data":{"col":1}}"#),
            Err(ProtocolError::Json(_))
        ));
        assert!(decode_handshake(r#"{"roomId":"a","extra":true}"#).is_err());
    }

    #[test]
    fn decodes_set_name_and_move() {
        let ev = decode_client_line(r#"{"event":"setName","data":{"player":1,"name":"Ann"}}"#)
            .unwrap();
        assert_eq!(
            ev,
            ClientEvent::SetName(NameChange {
                player: 1,
                name: "Ann".into()
            })
        );

        let ev = decode_client_line(r#"{"event":"move","data":{"col":3}}"#).unwrap();
        assert_eq!(ev, ClientEvent::Move(MoveEvent { col: 3 }));
    }

    #[test]
    fn out_of_range_player_reaches_the_core() {
        // The room rejects it; the codec only checks shape.
        let ev = decode_client_line(r#"{"event":"setName","data":{"player":0,"name":"X"}}"#)
            .unwrap();
        assert!(matches!(ev, ClientEvent::SetName(NameChange { player: 0, .. })));
    }

    #[test]
    fn malformed_client_lines_are_errors() {
        assert!(matches!(
            decode_client_line("not json"),
            Err(ProtocolError::Json(_))
        ));
        assert!(matches!(
            decode_client_line(r#"{"event":"move","data":{"col":"left"}}"#),
            Err(ProtocolError::Json(_))
        ));
        assert!(matches!(
            decode_client_line(r#"{"event":"move"}"#),
            Err(ProtocolError::Json(_))
        ));
        assert!(matches!(
            decode_client_line(r#"{"event":"restart","data":{}}"#),
            Err(ProtocolError::UnknownEvent(name)) if name == "restart"
        ));

        let long = format!(
            r#"{{"event":"setName","data":{{"player":1,"name":"{}"}}}}"#,
            "a".repeat(MAX_LINE_LEN)
        );
        assert!(matches!(
            decode_client_line(&long),
            Err(ProtocolError::LineTooLong(_))
        ));
    }

    #[test]
    fn server_events_match_the_wire_format() {
        let line = encode_server(&ServerEvent::PlayerAssignment(Role::Spectator)).unwrap();
        assert_eq!(line, r#"{"event":"playerAssignment","data":{"player":0}}"#);

        let line = encode_server(&ServerEvent::NameUpdate(NameMap {
            player1: "Ann".into(),
            player2: "Player 2".into(),
        }))
        .unwrap();
        assert_eq!(line, r#"{"event":"nameUpdate","data":{"1":"Ann","2":"Player 2"}}"#);

        let line = encode_server(&ServerEvent::Move(MoveEvent { col: 5 })).unwrap();
        assert_eq!(line, r#"{"event":"move","data":{"col":5}}"#);
    }

    #[test]
    fn client_side_decoding_rejects_bad_roles() {
        assert!(matches!(
            decode_server_line(r#"{"event":"playerAssignment","data":{"player":4}}"#),
            Err(ProtocolError::InvalidField("player"))
        ));
        assert_eq!(
            decode_server_line(r#"{"event":"playerAssignment","data":{"player":2}}"#).unwrap(),
            ServerEvent::PlayerAssignment(Role::Player2)
        );
    }
}
