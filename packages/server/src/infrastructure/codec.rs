//! Event codec: typed domain events <-> `{type, payload}` JSON envelopes.
//!
//! Pure and stateless; safe to call from the hub, from connections and from
//! the client.

use thiserror::Error;

use crate::{
    domain::{ClientEvent, ServerEvent, ValueObjectError},
    infrastructure::dto::websocket::{
        ChatMessageRequest, ClientEnvelope, RawEnvelope, ServerEnvelope,
    },
};

/// Wire discriminant of an inbound chat message
pub const CHAT_MESSAGE: &str = "chat_message";

/// Inbound frame could not be turned into an event.
///
/// Non-fatal: the inbound loop logs and skips the frame.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed envelope: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("unrecognized event type '{0}'")]
    UnknownType(String),

    #[error("invalid payload for '{kind}': {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value: {0}")]
    InvalidValue(#[from] ValueObjectError),
}

/// Event could not be serialized
#[derive(Debug, Error)]
#[error("failed to encode event: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Encode a server event into its wire envelope
pub fn encode(event: &ServerEvent) -> Result<String, EncodeError> {
    let envelope = ServerEnvelope::from(event.clone());
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode an inbound frame sent by a participant
pub fn decode(bytes: &[u8]) -> Result<ClientEvent, DecodeError> {
    let raw: RawEnvelope = serde_json::from_slice(bytes).map_err(DecodeError::Malformed)?;

    match raw.kind.as_str() {
        CHAT_MESSAGE => {
            let request: ChatMessageRequest =
                serde_json::from_value(raw.payload).map_err(|source| {
                    DecodeError::InvalidPayload {
                        kind: raw.kind.clone(),
                        source,
                    }
                })?;
            Ok(ClientEvent::ChatMessage {
                content: request.content,
            })
        }
        _ => Err(DecodeError::UnknownType(raw.kind)),
    }
}

/// Encode a participant request (client side)
pub fn encode_client_event(event: &ClientEvent) -> Result<String, EncodeError> {
    let envelope = ClientEnvelope::from(event.clone());
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a frame sent by the server (client side)
pub fn decode_server_event(bytes: &[u8]) -> Result<ServerEvent, DecodeError> {
    let envelope: ServerEnvelope =
        serde_json::from_slice(bytes).map_err(DecodeError::Malformed)?;
    Ok(ServerEvent::try_from(envelope)?)
}
