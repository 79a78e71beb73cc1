//! Client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the token
    #[error("Server rejected the session token (HTTP 401)")]
    Unauthorized,

    /// Could not establish the connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection went away
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}
