//! UI 層: axum による HTTP / WebSocket サーバー

mod auth;
mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use auth::AuthenticatedUser;
pub use error::ApiError;
pub use server::Server;
