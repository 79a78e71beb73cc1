//! Credential ports: session tokens and password hashes

use super::{AuthError, Identity, Password};

/// Validates a bearer credential and yields the verified identity.
///
/// Consulted at upgrade time, before any connection is constructed, and by
/// the HTTP layer for protected endpoints.
#[cfg_attr(test, mockall::automock)]
pub trait SessionAuthenticator: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Issues the bearer credential handed out after login or registration
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, identity: &Identity) -> Result<String, AuthError>;
}

/// One-way password hashing.
///
/// Implementations are CPU-bound; callers run them off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt
    fn hash(&self, password: &Password) -> Result<String, AuthError>;

    /// Whether `password` matches the stored `hash`
    fn verify(&self, password: &Password, hash: &str) -> Result<bool, AuthError>;
}
