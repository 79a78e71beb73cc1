//! Credential adapters: session tokens and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::JwtAuthenticator;
pub use password::Argon2PasswordHasher;
