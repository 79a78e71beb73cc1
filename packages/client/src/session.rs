//! WebSocket client session management.

use chrono::Utc;
use futures_util::{SinkExt, StreamExt, stream::SplitStream};
use hiroba_server::{
    domain::ClientEvent,
    infrastructure::codec::{decode_server_event, encode_client_event},
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use crate::error::ClientError;

use super::{domain::handshake_rejection, formatter::MessageFormatter, ui::redisplay_prompt};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Run one WebSocket session.
///
/// Returns `Ok(())` when the user ends input, and an error when the
/// connection could not be established or was lost.
pub async fn run_client_session(
    url: &str,
    token: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let request_url = format!("{}?token={}", url, token);

    let (ws_stream, _response) = connect_async(&request_url).await.map_err(|e| match e {
        WsError::Http(response) => handshake_rejection(response.status().as_u16()),
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to chat server!");
    println!("\nType messages and press Enter to send. Press Ctrl+C to exit.\n");

    let (mut write, read) = ws_stream.split();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(read_loop(read));

    let write_loop = async {
        while let Some(line) = input.recv().await {
            let frame = match encode_client_event(&ClientEvent::ChatMessage { content: line }) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            write
                .send(Message::text(frame))
                .await
                .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;

            print!("{}", MessageFormatter::format_sent_confirmation(&Utc::now()));
            redisplay_prompt();
        }

        // input closed: the user is leaving
        if let Err(e) = write.close().await {
            tracing::debug!("Close handshake failed: {}", e);
        }
        Ok::<(), ClientError>(())
    };

    tokio::select! {
        result = &mut read_task => {
            result.unwrap_or_else(|e| Err(ClientError::ConnectionLost(e.to_string())))
        }
        result = write_loop => {
            read_task.abort();
            result
        }
    }
}

/// Print everything the server sends until the connection goes away
async fn read_loop(mut read: SplitStream<Socket>) -> Result<(), ClientError> {
    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let formatted = match decode_server_event(text.as_bytes()) {
                    Ok(event) => MessageFormatter::format_event(&event),
                    Err(e) => {
                        tracing::debug!("Undecodable frame: {}", e);
                        MessageFormatter::format_raw_message(text.as_str())
                    }
                };
                print!("{}", formatted);
                redisplay_prompt();
            }
            Ok(Message::Binary(data)) => {
                print!("{}", MessageFormatter::format_binary_message(data.len()));
                redisplay_prompt();
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                return Err(ClientError::ConnectionLost(
                    "server closed the connection".to_string(),
                ));
            }
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                return Err(ClientError::ConnectionLost(e.to_string()));
            }
            // tungstenite answers pings itself
            _ => {}
        }
    }

    Err(ClientError::ConnectionLost("stream ended".to_string()))
}
