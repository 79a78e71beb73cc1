//! Read side of a connection: socket frames -> hub dispatch.

use std::{fmt::Display, sync::Arc, time::Duration};

use axum::extract::ws::Message;
use futures_util::{Stream, StreamExt};
use hiroba_shared::time::Clock;
use tokio::time::{Instant, timeout_at};

use super::TransportError;
use crate::{
    domain::{ChatMessage, ClientEvent, ConnectionId, Identity, MessageContent, ServerEvent},
    hub::Hub,
    infrastructure::codec,
};

pub(crate) struct Inbound {
    pub connection_id: ConnectionId,
    pub identity: Identity,
    pub hub: Hub,
    pub clock: Arc<dyn Clock>,
    pub max_message_size: usize,
    pub pong_wait: Duration,
}

impl Inbound {
    /// Read until the peer closes, the socket fails, or no pong arrives
    /// within `pong_wait`.
    ///
    /// Oversized or undecodable frames and empty messages are dropped and the
    /// loop keeps reading.
    pub(crate) async fn run<R, E>(self, mut stream: R) -> Result<(), TransportError>
    where
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let mut deadline = Instant::now() + self.pong_wait;

        loop {
            let message = match timeout_at(deadline, stream.next()).await {
                Err(_) => return Err(TransportError::LivenessTimeout(self.pong_wait)),
                Ok(None) => return Ok(()),
                Ok(Some(Err(e))) => return Err(TransportError::Read(e.to_string())),
                Ok(Some(Ok(message))) => message,
            };

            match message {
                Message::Text(text) => self.accept(text.as_str().as_bytes()).await?,
                Message::Binary(bytes) => self.accept(&bytes).await?,
                Message::Pong(_) => {
                    deadline = Instant::now() + self.pong_wait;
                }
                Message::Ping(_) => {
                    // axum answers pings on its own
                    tracing::trace!(connection_id = %self.connection_id, "Received ping");
                }
                Message::Close(_) => {
                    tracing::info!(
                        connection_id = %self.connection_id,
                        "'{}' requested close",
                        self.identity.username
                    );
                    return Ok(());
                }
            }
        }
    }

    async fn accept(&self, frame: &[u8]) -> Result<(), TransportError> {
        if frame.len() > self.max_message_size {
            tracing::warn!(
                connection_id = %self.connection_id,
                "Dropping oversized frame ({} bytes, limit {})",
                frame.len(),
                self.max_message_size
            );
            return Ok(());
        }

        let event = match codec::decode(frame) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(connection_id = %self.connection_id, "Ignoring frame: {}", e);
                return Ok(());
            }
        };

        match event {
            ClientEvent::ChatMessage { content } => {
                let content = match MessageContent::new(content) {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::debug!(connection_id = %self.connection_id, "Ignoring message: {}", e);
                        return Ok(());
                    }
                };

                let message = ChatMessage::new(self.identity.clone(), content, self.clock.now());
                self.hub.dispatch(ServerEvent::ChatMessage(message)).await?;
            }
        }

        Ok(())
    }
}
