//! HTTP API DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// A persisted chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecordDto {
    pub id: u64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of an account; the password hash never leaves the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response of register and login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponseDto {
    pub token: String,
    pub user: UserDto,
}

/// Response of `GET /api/auth/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDto {
    pub user_id: i64,
    pub username: String,
}

/// One entry of the hub membership snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub connection_id: String,
    pub user_id: i64,
    pub username: String,
}

/// Response of `GET /api/chat/participants`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantsDto {
    pub online: usize,
    pub participants: Vec<ParticipantDto>,
}

/// Error body returned by the HTTP API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
