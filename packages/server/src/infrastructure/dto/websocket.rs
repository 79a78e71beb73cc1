//! WebSocket envelope DTOs.
//!
//! Every frame is a JSON object `{"type": string, "payload": ...}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope sent from the server to participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEnvelope {
    ChatMessage(ChatMessagePayload),
    UserJoined(PresencePayload),
    UserLeft(PresencePayload),
    /// The payload is the bare number of connected participants
    OnlineCount(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresencePayload {
    pub username: String,
    pub message: String,
}

/// Envelope sent from participants to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientEnvelope {
    ChatMessage(ChatMessageRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub content: String,
}

/// Inbound envelope before its payload is interpreted.
///
/// Decoding in two steps lets the server tell an unknown `type` apart from a
/// malformed payload.
#[derive(Debug, Deserialize)]
pub struct RawEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}
