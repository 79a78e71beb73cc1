//! Domain events exchanged between participants and the hub.

use super::{entity::ChatMessage, value_object::Username};

/// Presence change notice (someone joined or left)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    pub username: Username,
    /// Human readable notice, e.g. "alice joined the chat"
    pub text: String,
}

/// Event sent from the hub to participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    ChatMessage(ChatMessage),
    UserJoined(Presence),
    UserLeft(Presence),
    OnlineCount(usize),
}

impl ServerEvent {
    pub fn user_joined(username: &Username) -> Self {
        Self::UserJoined(Presence {
            username: username.clone(),
            text: format!("{} joined the chat", username),
        })
    }

    pub fn user_left(username: &Username) -> Self {
        Self::UserLeft(Presence {
            username: username.clone(),
            text: format!("{} left the chat", username),
        })
    }

    /// Wire discriminant of this event
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChatMessage(_) => "chat_message",
            Self::UserJoined(_) => "user_joined",
            Self::UserLeft(_) => "user_left",
            Self::OnlineCount(_) => "online_count",
        }
    }
}

/// Event sent from a participant to the server.
///
/// Content is kept raw here; it becomes a `MessageContent` only once the
/// inbound loop has validated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    ChatMessage { content: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_events_carry_notice_text() {
        // テスト項目: 入退室イベントに通知文が設定される
        // given (前提条件):
        let alice = Username::new("alice".to_string()).unwrap();

        // when (操作):
        let joined = ServerEvent::user_joined(&alice);
        let left = ServerEvent::user_left(&alice);

        // then (期待する結果):
        match (joined, left) {
            (ServerEvent::UserJoined(j), ServerEvent::UserLeft(l)) => {
                assert_eq!(j.username, alice);
                assert_eq!(j.text, "alice joined the chat");
                assert_eq!(l.text, "alice left the chat");
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_kind_matches_wire_discriminant() {
        // テスト項目: kind() がワイヤ上の type 文字列と一致する
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(ServerEvent::OnlineCount(3).kind(), "online_count");
        let bob = Username::new("bob".to_string()).unwrap();
        assert_eq!(ServerEvent::user_left(&bob).kind(), "user_left");
    }
}
