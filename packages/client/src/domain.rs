//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// HTTP status the server answers a bad credential with
const UNAUTHORIZED: u16 = 401;

/// Map a handshake rejection status onto a client error
pub fn handshake_rejection(status: u16) -> ClientError {
    if status == UNAUTHORIZED {
        ClientError::Unauthorized
    } else {
        ClientError::ConnectionError(format!("handshake rejected with HTTP {}", status))
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// Retrying with the same token cannot succeed after a 401.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Unauthorized)
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `attempts` - Number of failed attempts so far
/// * `max_attempts` - The maximum number of connection attempts allowed
pub fn should_attempt_reconnect(error: &ClientError, attempts: u32, max_attempts: u32) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    attempts < max_attempts
}
