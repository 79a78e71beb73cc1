//! Conversion logic between DTOs and domain types.

use crate::{
    domain::{
        ChatMessage, ClientEvent, Identity, MessageContent, MessageRecord, Presence, ServerEvent,
        UserAccount, UserId, Username, ValueObjectError,
    },
    hub::Participant,
    infrastructure::dto::{http, websocket as dto},
    usecase::AuthSession,
};

// ========================================
// Domain → DTO
// ========================================

impl From<ChatMessage> for dto::ChatMessagePayload {
    fn from(message: ChatMessage) -> Self {
        Self {
            user_id: message.author.user_id.value(),
            username: message.author.username.into_string(),
            content: message.content.into_string(),
            timestamp: message.timestamp,
        }
    }
}

impl From<Presence> for dto::PresencePayload {
    fn from(presence: Presence) -> Self {
        Self {
            username: presence.username.into_string(),
            message: presence.text,
        }
    }
}

impl From<ServerEvent> for dto::ServerEnvelope {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::ChatMessage(message) => Self::ChatMessage(message.into()),
            ServerEvent::UserJoined(presence) => Self::UserJoined(presence.into()),
            ServerEvent::UserLeft(presence) => Self::UserLeft(presence.into()),
            ServerEvent::OnlineCount(count) => Self::OnlineCount(count),
        }
    }
}

impl From<ClientEvent> for dto::ClientEnvelope {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::ChatMessage { content } => {
                Self::ChatMessage(dto::ChatMessageRequest { content })
            }
        }
    }
}

impl From<MessageRecord> for http::MessageRecordDto {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id.value(),
            username: record.username.into_string(),
            content: record.content.into_string(),
            created_at: record.created_at,
        }
    }
}

impl From<Identity> for http::ProfileDto {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id.value(),
            username: identity.username.into_string(),
        }
    }
}

impl From<AuthSession> for http::AuthResponseDto {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.account.into(),
        }
    }
}

impl From<UserAccount> for http::UserDto {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id.value(),
            username: account.username.into_string(),
            email: account.email.to_string(),
            created_at: account.created_at,
        }
    }
}

impl From<Participant> for http::ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            connection_id: participant.connection_id.to_string(),
            user_id: participant.identity.user_id.value(),
            username: participant.identity.username.into_string(),
        }
    }
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ChatMessagePayload> for ChatMessage {
    type Error = ValueObjectError;

    fn try_from(payload: dto::ChatMessagePayload) -> Result<Self, Self::Error> {
        let author = Identity::new(
            UserId::new(payload.user_id)?,
            Username::new(payload.username)?,
        );
        Ok(ChatMessage::new(
            author,
            MessageContent::new(payload.content)?,
            payload.timestamp,
        ))
    }
}

impl TryFrom<dto::PresencePayload> for Presence {
    type Error = ValueObjectError;

    fn try_from(payload: dto::PresencePayload) -> Result<Self, Self::Error> {
        Ok(Presence {
            username: Username::new(payload.username)?,
            text: payload.message,
        })
    }
}

impl TryFrom<dto::ServerEnvelope> for ServerEvent {
    type Error = ValueObjectError;

    fn try_from(envelope: dto::ServerEnvelope) -> Result<Self, Self::Error> {
        Ok(match envelope {
            dto::ServerEnvelope::ChatMessage(payload) => Self::ChatMessage(payload.try_into()?),
            dto::ServerEnvelope::UserJoined(payload) => Self::UserJoined(payload.try_into()?),
            dto::ServerEnvelope::UserLeft(payload) => Self::UserLeft(payload.try_into()?),
            dto::ServerEnvelope::OnlineCount(count) => Self::OnlineCount(count),
        })
    }
}
