//! Entities

use chrono::{DateTime, Utc};

use super::value_object::{Email, MessageContent, UserId, Username};

/// Verified identity of a participant, as yielded by the session authenticator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub user_id: UserId,
    pub username: Username,
}

impl Identity {
    pub fn new(user_id: UserId, username: Username) -> Self {
        Self { user_id, username }
    }
}

/// A fully-formed chat message, ready to be broadcast.
///
/// The timestamp is supplied by whoever creates the message (the connection
/// that received it, or the HTTP send path) and is kept as-is on persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: Identity,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(author: Identity, content: MessageContent, timestamp: DateTime<Utc>) -> Self {
        Self {
            author,
            content,
            timestamp,
        }
    }
}

/// Persisted form of a chat message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: u64,
    pub user_id: UserId,
    pub username: Username,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Build the record for `message` under the store-assigned `id`
    pub fn from_message(id: u64, message: ChatMessage) -> Self {
        Self {
            id,
            user_id: message.author.user_id,
            username: message.author.username,
            content: message.content,
            created_at: message.timestamp,
        }
    }
}

/// Registration data before the account store has assigned an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    pub username: Username,
    pub email: Email,
    /// PHC-formatted password hash; the plain text is never stored
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Build the account for `new` under the store-assigned `id`
    pub fn from_new(id: UserId, new: NewUserAccount) -> Self {
        Self {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            created_at: new.created_at,
        }
    }

    /// Identity carried by this account's session tokens
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.username.clone())
    }
}
