//! Message formatting utilities for client display.

use chrono::{DateTime, Utc};
use hiroba_server::domain::ServerEvent;
use hiroba_shared::time::{to_jst_clock_time, to_jst_rfc3339};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any event received from the server
    pub fn format_event(event: &ServerEvent) -> String {
        match event {
            ServerEvent::ChatMessage(message) => Self::format_chat_message(
                message.author.username.as_str(),
                message.content.as_str(),
                &message.timestamp,
            ),
            ServerEvent::UserJoined(presence) => Self::format_user_joined(&presence.text),
            ServerEvent::UserLeft(presence) => Self::format_user_left(&presence.text),
            ServerEvent::OnlineCount(count) => Self::format_online_count(*count),
        }
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `from` - Username of the sender
    /// * `content` - The message content
    /// * `sent_at` - When the message was sent
    pub fn format_chat_message(from: &str, content: &str, sent_at: &DateTime<Utc>) -> String {
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             sent at {}\n\
             ------------------------------------------------------------\n",
            from,
            content,
            to_jst_rfc3339(sent_at)
        )
    }

    pub fn format_user_joined(notice: &str) -> String {
        format!("\n+ {}\n", notice)
    }

    pub fn format_user_left(notice: &str) -> String {
        format!("\n- {}\n", notice)
    }

    pub fn format_online_count(count: usize) -> String {
        format!("\n({} online)\n", count)
    }

    /// Format a confirmation line after sending
    pub fn format_sent_confirmation(sent_at: &DateTime<Utc>) -> String {
        format!("sent at {}\n", to_jst_clock_time(sent_at))
    }

    /// Format a frame that could not be decoded
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n[binary] {} bytes\n", byte_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiroba_server::domain::{ChatMessage, Identity, MessageContent, UserId, Username};

    #[test]
    fn test_format_chat_message_in_jst() {
        // テスト項目: チャットメッセージが送信者・本文・JST の送信時刻付きで整形される
        // given (前提条件):
        let sent_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();

        // when (操作):
        let formatted = MessageFormatter::format_chat_message("alice", "hi", &sent_at);

        // then (期待する結果):
        assert!(formatted.contains("@alice: hi"));
        assert!(formatted.contains("sent at 2023-11-15T07:13:20+09:00"));
    }

    #[test]
    fn test_format_event_dispatches_on_kind() {
        // テスト項目: 各イベントが種類に応じて整形される
        // given (前提条件):
        let bob = Username::new("bob".to_string()).unwrap();
        let chat = ServerEvent::ChatMessage(ChatMessage::new(
            Identity::new(UserId::new(2).unwrap(), bob.clone()),
            MessageContent::new("hello".to_string()).unwrap(),
            DateTime::from_timestamp_millis(0).unwrap(),
        ));

        // when (操作) / then (期待する結果):
        assert!(MessageFormatter::format_event(&chat).contains("@bob: hello"));
        assert_eq!(
            MessageFormatter::format_event(&ServerEvent::user_joined(&bob)),
            "\n+ bob joined the chat\n"
        );
        assert_eq!(
            MessageFormatter::format_event(&ServerEvent::user_left(&bob)),
            "\n- bob left the chat\n"
        );
        assert_eq!(
            MessageFormatter::format_event(&ServerEvent::OnlineCount(3)),
            "\n(3 online)\n"
        );
    }

    #[test]
    fn test_format_sent_confirmation_uses_jst_clock_time() {
        // テスト項目: 送信確認が JST の時刻で表示される
        // given (前提条件):
        let sent_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();

        // when (操作):
        let formatted = MessageFormatter::format_sent_confirmation(&sent_at);

        // then (期待する結果):
        assert_eq!(formatted, "sent at 07:13:20\n");
    }

    #[test]
    fn test_format_fallbacks() {
        // テスト項目: 解釈できないフレームもそのまま表示される
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(MessageFormatter::format_raw_message("???"), "\n[raw] ???\n");
        assert_eq!(
            MessageFormatter::format_binary_message(4),
            "\n[binary] 4 bytes\n"
        );
    }
}
