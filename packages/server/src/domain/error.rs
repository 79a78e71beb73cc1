//! Domain errors.

use thiserror::Error;

/// Value object validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("user id must be positive (got {0})")]
    InvalidUserId(i64),

    #[error("username '{0}' must be 3-50 characters without surrounding whitespace")]
    InvalidUsername(String),

    #[error("message content must not be empty")]
    EmptyContent,

    #[error("message content is too long ({len} > {max} characters)")]
    ContentTooLong { len: usize, max: usize },

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Credential rejected by the session authenticator.
///
/// Raised before a connection is admitted; never reaches the hub.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("credential is missing")]
    MissingToken,

    #[error("authorization header must use the Bearer scheme")]
    InvalidFormat,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token claims are invalid: {0}")]
    InvalidClaims(#[from] ValueObjectError),

    #[error("failed to issue token: {0}")]
    IssueFailed(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    HashFailed(String),
}

/// Persistence gateway failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

/// Account store failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    #[error("user store unavailable: {0}")]
    Unavailable(String),
}
