//! Persistence gateway implementations.
//!
//! - `inmemory`: process-local stores (default)

pub mod inmemory;

pub use inmemory::{InMemoryMessageStore, InMemoryUserRepository};
