//! Request handlers.

mod http;
mod websocket;

pub use http::{
    get_messages, get_participants, get_profile, health_check, login, register, send_message,
};
pub use websocket::websocket_handler;
