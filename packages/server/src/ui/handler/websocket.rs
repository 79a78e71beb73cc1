//! WebSocket handshake handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State, ws::WebSocketUpgrade},
    http::HeaderMap,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    connection::Connection,
    ui::{auth::handshake_token, error::ApiError, state::AppState},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// Authenticate, then upgrade.
///
/// A missing or invalid credential is answered with 401 before any upgrade.
/// Reads on the upgraded socket are capped at `max_frame_size`.
pub async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let identity = handshake_token(query.token.as_deref(), &headers)
        .and_then(|token| state.authenticator.verify(token))
        .inspect_err(|e| tracing::warn!("WebSocket handshake rejected: {}", e))?;

    let connection = Connection::new(
        identity,
        state.hub.clone(),
        state.connection_config,
        Arc::clone(&state.clock),
    );
    tracing::info!(
        connection_id = %connection.id(),
        "Upgrading connection"
    );

    // the transport refuses anything past the hard cap instead of buffering it
    let limit = state.connection_config.max_frame_size;
    Ok(ws
        .max_frame_size(limit)
        .max_message_size(limit)
        .on_upgrade(move |socket| connection.run(socket)))
}
