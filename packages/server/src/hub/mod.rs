//! Registry/Hub: the single control loop that owns connection membership and
//! fans events out to every connected participant.
//!
//! ## 設計ノート
//!
//! The membership set lives inside [`actor::HubActor`] and is never shared.
//! Everything else talks to it through a cloneable [`Hub`] handle that sends
//! [`HubCommand`]s over a bounded queue, so registrations, unregistrations
//! and broadcasts are applied in one total order.
//!
//! Each member's outbound queue is bounded. The hub only ever `try_send`s into
//! it; a full (or closed) queue means the member is dead and it is evicted on
//! the spot. The hub holds the only sender of every outbound queue, so
//! dropping a member is what closes its queue, exactly once.
//!
//! Chat messages are appended to history by a separate writer task fed in
//! broadcast order, so the store sees them in the same order the room did.

mod actor;

use std::{num::NonZeroUsize, sync::Arc};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{ConnectionId, Identity, MessageStore, ServerEvent};

use actor::{HubActor, write_history};

/// A pre-encoded wire frame, shared by every member it is delivered to
pub type Frame = Arc<str>;

/// Default depth of the hub's request queue
pub const DEFAULT_COMMAND_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => panic!("command capacity must be positive"),
};

/// Hub tunables
#[derive(Debug, Clone, Copy)]
pub struct HubConfig {
    /// Depth of the request queue feeding the control loop
    pub command_capacity: NonZeroUsize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            command_capacity: DEFAULT_COMMAND_CAPACITY,
        }
    }
}

/// Hub request failed because the control loop is gone
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("hub control loop has stopped")]
    Closed,
}

/// A connection as seen by the hub
#[derive(Debug)]
pub struct Member {
    pub connection_id: ConnectionId,
    pub identity: Identity,
    /// Sending half of the connection's bounded outbound queue
    pub outbound: mpsc::Sender<Frame>,
}

impl Member {
    pub fn new(
        connection_id: ConnectionId,
        identity: Identity,
        outbound: mpsc::Sender<Frame>,
    ) -> Self {
        Self {
            connection_id,
            identity,
            outbound,
        }
    }
}

/// Snapshot entry of the membership set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub identity: Identity,
}

/// Requests processed by the control loop
#[derive(Debug)]
pub enum HubCommand {
    Register(Member),
    Unregister(ConnectionId),
    Broadcast(Frame),
    Dispatch(ServerEvent),
    Snapshot(oneshot::Sender<Vec<Participant>>),
}

/// Handle to the hub control loop
#[derive(Debug, Clone)]
pub struct Hub {
    commands: mpsc::Sender<HubCommand>,
}

impl Hub {
    /// Start the control loop on the current tokio runtime.
    ///
    /// The loop runs until every `Hub` handle has been dropped.
    pub fn spawn(store: Arc<dyn MessageStore>, config: HubConfig) -> Self {
        let (commands, requests) = mpsc::channel(config.command_capacity.get());
        let (history, messages) = mpsc::unbounded_channel();
        tokio::spawn(write_history(store, messages));
        tokio::spawn(HubActor::new(requests, history).run());
        Self { commands }
    }

    /// Admit a connection and announce it to the room
    pub async fn register(&self, member: Member) -> Result<(), HubError> {
        self.send(HubCommand::Register(member)).await
    }

    /// Remove a connection. Safe to call any number of times.
    pub async fn unregister(&self, connection_id: ConnectionId) -> Result<(), HubError> {
        self.send(HubCommand::Unregister(connection_id)).await
    }

    /// Deliver a pre-encoded frame to every current member
    pub async fn broadcast(&self, frame: Frame) -> Result<(), HubError> {
        self.send(HubCommand::Broadcast(frame)).await
    }

    /// Encode and broadcast an event; chat messages are then persisted
    /// asynchronously
    pub async fn dispatch(&self, event: ServerEvent) -> Result<(), HubError> {
        self.send(HubCommand::Dispatch(event)).await
    }

    /// Current members, sorted by username
    pub async fn participants(&self) -> Result<Vec<Participant>, HubError> {
        let (reply, answer) = oneshot::channel();
        self.send(HubCommand::Snapshot(reply)).await?;
        answer.await.map_err(|_| HubError::Closed)
    }

    async fn send(&self, command: HubCommand) -> Result<(), HubError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| HubError::Closed)
    }
}
