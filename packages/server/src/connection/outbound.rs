//! Write side of a connection: outbound queue -> socket, plus keep-alive pings.

use std::{fmt::Display, time::Duration};

use axum::{body::Bytes, extract::ws::Message};
use futures_util::{Sink, SinkExt};
use tokio::{
    sync::mpsc,
    time::{Instant, interval_at, timeout},
};

use super::TransportError;
use crate::{domain::ConnectionId, hub::Frame};

pub(crate) struct Outbound {
    pub connection_id: ConnectionId,
    pub write_wait: Duration,
    pub ping_period: Duration,
}

impl Outbound {
    /// Drain the outbound queue into the socket and ping every `ping_period`.
    ///
    /// Ends with a close frame once the hub closes the queue, or with an error
    /// as soon as a write fails or takes longer than `write_wait`.
    pub(crate) async fn run<W>(
        self,
        mut sink: W,
        mut queue: mpsc::Receiver<Frame>,
    ) -> Result<(), TransportError>
    where
        W: Sink<Message> + Unpin,
        W::Error: Display,
    {
        let mut ping = interval_at(Instant::now() + self.ping_period, self.ping_period);

        loop {
            tokio::select! {
                frame = queue.recv() => match frame {
                    Some(frame) => {
                        self.write(&mut sink, Message::Text(frame.as_ref().into()))
                            .await?;
                    }
                    None => {
                        tracing::debug!(connection_id = %self.connection_id, "Outbound queue closed");
                        if let Err(e) = self.write(&mut sink, Message::Close(None)).await {
                            tracing::debug!(connection_id = %self.connection_id, "Close frame not sent: {}", e);
                        }
                        return Ok(());
                    }
                },
                _ = ping.tick() => {
                    self.write(&mut sink, Message::Ping(Bytes::new())).await?;
                }
            }
        }
    }

    async fn write<W>(&self, sink: &mut W, message: Message) -> Result<(), TransportError>
    where
        W: Sink<Message> + Unpin,
        W::Error: Display,
    {
        match timeout(self.write_wait, sink.send(message)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(TransportError::Write(e.to_string())),
            Err(_) => Err(TransportError::WriteTimeout(self.write_wait)),
        }
    }
}
