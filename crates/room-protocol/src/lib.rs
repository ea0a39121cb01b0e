//! room-protocol
//!
//! Wire-level encoding/decoding for the room server.
//!
//! This crate turns logical room events (`room_core::ClientEvent` /
//! `ServerEvent`) into single lines of JSON and back again.
//!
//! - [`wire_types`] : event names, payload shapes, limits
//! - [`json_codec`] : line encoders/decoders and the join handshake

pub mod wire_types;
pub mod json_codec;

pub use json_codec::{
    ProtocolError,
    decode_client_line,
    decode_handshake,
    decode_server_line,
    encode_client,
    encode_handshake,
    encode_server,
};
