//! One authenticated participant's transport session.
//!
//! A connection registers with the hub, then runs two independent tasks:
//!
//! - inbound: socket -> decode -> validate -> `Hub::dispatch`
//! - outbound: bounded queue -> socket, with periodic pings
//!
//! Whichever side stops first takes the connection down. The hub owns the
//! outbound queue's sender, so unregistering is what ends the outbound side.

mod error;
mod inbound;
mod outbound;

use std::{fmt::Display, num::NonZeroUsize, sync::Arc, time::Duration};

use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, Stream, StreamExt};
use hiroba_shared::time::Clock;
use tokio::{
    sync::{mpsc, watch},
    task::JoinError,
};

pub use error::TransportError;

use crate::{
    domain::{ConnectionId, Identity},
    hub::{Hub, Member},
};
use inbound::Inbound;
use outbound::Outbound;

/// Default depth of a connection's outbound queue
pub const DEFAULT_QUEUE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => panic!("queue capacity must be positive"),
};

/// Per-connection tunables
#[derive(Debug, Clone, Copy)]
pub struct ConnectionConfig {
    /// Depth of the outbound queue; a peer that falls this far behind is evicted
    pub queue_capacity: NonZeroUsize,
    /// Upper bound on a single socket write
    pub write_wait: Duration,
    /// Read deadline, refreshed by every pong
    pub pong_wait: Duration,
    /// Interval between keep-alive pings; must be shorter than `pong_wait`
    pub ping_period: Duration,
    /// Inbound frames larger than this are dropped
    pub max_message_size: usize,
    /// Hard cap enforced by the transport while reading; a larger frame is
    /// a read error and ends the connection
    pub max_frame_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        let pong_wait = Duration::from_secs(60);
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            write_wait: Duration::from_secs(10),
            pong_wait,
            ping_period: pong_wait * 9 / 10,
            max_message_size: 512,
            max_frame_size: 16 * 1024,
        }
    }
}

/// Connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Active,
    Closing,
    Closed,
}

pub struct Connection {
    id: ConnectionId,
    identity: Identity,
    hub: Hub,
    config: ConnectionConfig,
    clock: Arc<dyn Clock>,
    state: watch::Sender<ConnectionState>,
}

impl Connection {
    pub fn new(
        identity: Identity,
        hub: Hub,
        config: ConnectionConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            id: ConnectionId::generate(),
            identity,
            hub,
            config,
            clock,
            state: watch::Sender::new(ConnectionState::Connecting),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Follow lifecycle changes, including after the session has been
    /// handed to `run`/`serve`
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Run the session on an upgraded WebSocket until either side stops
    pub async fn run(self, socket: WebSocket) {
        let (sink, stream) = socket.split();
        self.serve(sink, stream).await;
    }

    /// Run the session over any message sink/stream pair
    pub async fn serve<W, R, E>(self, sink: W, stream: R)
    where
        W: Sink<Message> + Unpin + Send + 'static,
        W::Error: Display,
        R: Stream<Item = Result<Message, E>> + Unpin + Send + 'static,
        E: Display + Send + 'static,
    {
        self.transition(ConnectionState::Connecting);

        let (outbound_tx, queue) = mpsc::channel(self.config.queue_capacity.get());
        let member = Member::new(self.id, self.identity.clone(), outbound_tx);
        if let Err(e) = self.hub.register(member).await {
            tracing::error!(connection_id = %self.id, "Failed to register: {}", e);
            self.transition(ConnectionState::Closed);
            return;
        }
        self.transition(ConnectionState::Active);

        let inbound = Inbound {
            connection_id: self.id,
            identity: self.identity.clone(),
            hub: self.hub.clone(),
            clock: Arc::clone(&self.clock),
            max_message_size: self.config.max_message_size,
            pong_wait: self.config.pong_wait,
        };
        let outbound = Outbound {
            connection_id: self.id,
            write_wait: self.config.write_wait,
            ping_period: self.config.ping_period,
        };

        let mut inbound_task = tokio::spawn(inbound.run(stream));
        let mut outbound_task = tokio::spawn(outbound.run(sink, queue));

        tokio::select! {
            result = &mut inbound_task => {
                self.report("inbound", result);
                self.transition(ConnectionState::Closing);
                // unregistering closes the queue, which lets the outbound side
                // flush and send a close frame
                self.leave().await;
                let result = outbound_task.await;
                self.report("outbound", result);
            }
            result = &mut outbound_task => {
                self.report("outbound", result);
                self.transition(ConnectionState::Closing);
                inbound_task.abort();
                self.leave().await;
            }
        }

        self.transition(ConnectionState::Closed);
    }

    async fn leave(&self) {
        if let Err(e) = self.hub.unregister(self.id).await {
            tracing::warn!(connection_id = %self.id, "Failed to unregister: {}", e);
        }
    }

    fn report(&self, side: &str, result: Result<Result<(), TransportError>, JoinError>) {
        match result {
            Ok(Ok(())) => tracing::debug!(connection_id = %self.id, "{} side finished", side),
            Ok(Err(e)) => tracing::info!(connection_id = %self.id, "{} side stopped: {}", side, e),
            Err(e) if e.is_cancelled() => {}
            Err(e) => tracing::error!(connection_id = %self.id, "{} task failed: {}", side, e),
        }
    }

    fn transition(&self, state: ConnectionState) {
        self.state.send_replace(state);
        tracing::debug!(
            connection_id = %self.id,
            user = %self.identity.username,
            ?state,
            "Connection state changed"
        );
    }
}
