//! The hub control loop.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use tokio::sync::mpsc::{self, error::TrySendError};

use super::{Frame, HubCommand, Member, Participant};
use crate::{
    domain::{ChatMessage, ConnectionId, MessageStore, ServerEvent},
    infrastructure::codec,
};

/// Owns the membership set; every mutation happens on this task
pub(super) struct HubActor {
    requests: mpsc::Receiver<HubCommand>,
    members: HashMap<ConnectionId, Member>,
    history: mpsc::UnboundedSender<ChatMessage>,
}

impl HubActor {
    pub(super) fn new(
        requests: mpsc::Receiver<HubCommand>,
        history: mpsc::UnboundedSender<ChatMessage>,
    ) -> Self {
        Self {
            requests,
            members: HashMap::new(),
            history,
        }
    }

    pub(super) async fn run(mut self) {
        tracing::info!("Hub control loop started");

        while let Some(command) = self.requests.recv().await {
            self.handle(command);
        }

        tracing::info!(
            "Hub control loop stopped ({} members dropped)",
            self.members.len()
        );
    }

    fn handle(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register(member) => self.register(member),
            HubCommand::Unregister(connection_id) => self.unregister(connection_id),
            HubCommand::Broadcast(frame) => self.deliver(&frame),
            HubCommand::Dispatch(event) => self.dispatch(event),
            HubCommand::Snapshot(reply) => {
                // the requester may have given up waiting
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn register(&mut self, member: Member) {
        let connection_id = member.connection_id;
        let username = member.identity.username.clone();

        if self.members.contains_key(&connection_id) {
            tracing::warn!(%connection_id, "Connection is already registered; ignoring");
            return;
        }

        self.members.insert(connection_id, member);
        tracing::info!(
            %connection_id,
            "'{}' joined ({} online)",
            username,
            self.members.len()
        );

        // the newcomer learns the room size before anything else
        if let Some(frame) = encode_frame(&ServerEvent::OnlineCount(self.members.len()))
            && let Some(newcomer) = self.members.get(&connection_id)
            && !offer(newcomer, &frame)
        {
            // gone before it was announced; nobody needs to hear about it
            self.members.remove(&connection_id);
            return;
        }

        self.deliver_event(&ServerEvent::user_joined(&username));
        self.deliver_event(&ServerEvent::OnlineCount(self.members.len()));
    }

    fn unregister(&mut self, connection_id: ConnectionId) {
        match self.members.remove(&connection_id) {
            Some(member) => {
                tracing::info!(
                    %connection_id,
                    "'{}' left ({} online)",
                    member.identity.username,
                    self.members.len()
                );
                self.announce_departures(vec![member]);
            }
            None => tracing::debug!(%connection_id, "Unregister of unknown connection ignored"),
        }
    }

    fn dispatch(&mut self, event: ServerEvent) {
        let Some(frame) = encode_frame(&event) else {
            return;
        };
        self.deliver(&frame);

        if let ServerEvent::ChatMessage(message) = event {
            self.persist(message);
        }
    }

    /// Hand a broadcast message to the history writer without waiting on it
    fn persist(&self, message: ChatMessage) {
        if self.history.send(message).is_err() {
            tracing::error!("History writer has stopped; chat message not persisted");
        }
    }

    fn deliver_event(&mut self, event: &ServerEvent) {
        if let Some(frame) = encode_frame(event) {
            self.deliver(&frame);
        }
    }

    /// Fan a frame out and settle every eviction it caused
    fn deliver(&mut self, frame: &Frame) {
        let evicted = self.fan_out(frame);
        self.announce_departures(evicted);
    }

    /// Offer `frame` to every member; members that cannot take it are removed
    /// and returned
    fn fan_out(&mut self, frame: &Frame) -> Vec<Member> {
        let dead: Vec<ConnectionId> = self
            .members
            .values()
            .filter(|member| !offer(member, frame))
            .map(|member| member.connection_id)
            .collect();

        dead.iter()
            .filter_map(|connection_id| self.members.remove(connection_id))
            .collect()
    }

    /// Tell the room about departed members.
    ///
    /// Announcing can itself evict more members, so this works through a
    /// queue until nobody else drops out.
    fn announce_departures(&mut self, departed: Vec<Member>) {
        let mut pending = VecDeque::from(departed);

        while let Some(member) = pending.pop_front() {
            let username = member.identity.username.clone();
            // dropping the only sender closes the member's outbound queue
            drop(member);

            if let Some(frame) = encode_frame(&ServerEvent::user_left(&username)) {
                pending.extend(self.fan_out(&frame));
            }
            if let Some(frame) = encode_frame(&ServerEvent::OnlineCount(self.members.len())) {
                pending.extend(self.fan_out(&frame));
            }
        }
    }

    fn snapshot(&self) -> Vec<Participant> {
        let mut participants: Vec<Participant> = self
            .members
            .values()
            .map(|member| Participant {
                connection_id: member.connection_id,
                identity: member.identity.clone(),
            })
            .collect();
        participants.sort_by(|a, b| {
            a.identity
                .username
                .as_str()
                .cmp(b.identity.username.as_str())
                .then_with(|| a.connection_id.to_string().cmp(&b.connection_id.to_string()))
        });
        participants
    }
}

/// Append chat messages one at a time, in broadcast order.
///
/// Runs beside the control loop so a slow store never delays fan-out.
/// Failures are logged and never reach the room.
pub(super) async fn write_history(
    store: Arc<dyn MessageStore>,
    mut messages: mpsc::UnboundedReceiver<ChatMessage>,
) {
    while let Some(message) = messages.recv().await {
        if let Err(e) = store.append(message).await {
            tracing::error!("Failed to persist chat message: {}", e);
        }
    }
    tracing::debug!("History writer stopped");
}

/// Non-blocking hand-off into a member's queue. `false` means evict.
fn offer(member: &Member, frame: &Frame) -> bool {
    match member.outbound.try_send(Arc::clone(frame)) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(
                connection_id = %member.connection_id,
                "Outbound queue of '{}' is full; evicting",
                member.identity.username
            );
            false
        }
        Err(TrySendError::Closed(_)) => {
            tracing::debug!(
                connection_id = %member.connection_id,
                "Outbound queue of '{}' is closed; evicting",
                member.identity.username
            );
            false
        }
    }
}

fn encode_frame(event: &ServerEvent) -> Option<Frame> {
    match codec::encode(event) {
        Ok(text) => Some(Frame::from(text)),
        Err(e) => {
            tracing::error!("Dropping '{}' event: {}", event.kind(), e);
            None
        }
    }
}
