//! Value objects
//!
//! 検証済みの値だけを表現する型。生成時にバリデーションを行い、
//! 以降は不変として扱う。

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Minimum length of a display name (in characters)
pub const USERNAME_MIN_CHARS: usize = 3;
/// Maximum length of a display name (in characters)
pub const USERNAME_MAX_CHARS: usize = 50;
/// Maximum length of a chat message body (in characters)
pub const MESSAGE_CONTENT_MAX_CHARS: usize = 1000;
/// Minimum length of an account password (in characters)
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Verified user identifier issued by the account system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId. Ids are strictly positive.
    pub fn new(value: i64) -> Result<Self, ValueObjectError> {
        if value <= 0 {
            return Err(ValueObjectError::InvalidUserId(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name shown to other participants
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// Surrounding whitespace is not allowed and the length must be within
    /// `USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS`.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let chars = value.chars().count();
        if value.trim() != value || !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&chars) {
            return Err(ValueObjectError::InvalidUsername(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent. Only the empty string is rejected;
    /// whitespace is content like any other.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyContent);
        }
        let chars = value.chars().count();
        if chars > MESSAGE_CONTENT_MAX_CHARS {
            return Err(ValueObjectError::ContentTooLong {
                len: chars,
                max: MESSAGE_CONTENT_MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact address of a registered account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create a new Email. Requires a single `@` with a non-empty local part
    /// and a dotted domain, and no whitespace.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.split('.').count() >= 2
                    && domain.split('.').all(|label| !label.is_empty())
                    && !value.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(ValueObjectError::InvalidEmail(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain-text password as submitted by the user.
///
/// Only lives long enough to be hashed or checked; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Create a new Password of at least `PASSWORD_MIN_CHARS` characters
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.chars().count() < PASSWORD_MIN_CHARS {
            return Err(ValueObjectError::PasswordTooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Identifies one live transport session.
///
/// A user may hold several connections at once (e.g. two terminals), so the
/// hub keys its membership set by connection, not by user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_rejects_non_positive_values() {
        // テスト項目: 0 以下の UserId は生成できない
        // given (前提条件):
        let values = [0, -1, i64::MIN];

        // when (操作):
        let results: Vec<_> = values.iter().map(|v| UserId::new(*v)).collect();

        // then (期待する結果):
        assert!(results.iter().all(|r| r.is_err()));
        assert_eq!(UserId::new(42).unwrap().value(), 42);
    }

    #[test]
    fn test_username_length_boundaries() {
        // テスト項目: Username の文字数が境界値どおりに検証される
        // given (前提条件):
        let too_short = "ab".to_string();
        let shortest = "abc".to_string();
        let longest = "a".repeat(USERNAME_MAX_CHARS);
        let too_long = "a".repeat(USERNAME_MAX_CHARS + 1);

        // when (操作) / then (期待する結果):
        assert!(Username::new(too_short).is_err());
        assert!(Username::new(shortest).is_ok());
        assert!(Username::new(longest).is_ok());
        assert!(Username::new(too_long).is_err());
    }

    #[test]
    fn test_username_counts_characters_not_bytes() {
        // テスト項目: マルチバイト文字は1文字として数えられる
        // given (前提条件):
        let name = "さくら".to_string();

        // when (操作):
        let result = Username::new(name);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "さくら");
    }

    #[test]
    fn test_username_rejects_surrounding_whitespace() {
        // テスト項目: 前後に空白を含む Username は拒否される
        // given (前提条件):
        let name = " alice ".to_string();

        // when (操作):
        let result = Username::try_from(name);

        // then (期待する結果):
        assert!(matches!(result, Err(ValueObjectError::InvalidUsername(_))));
    }

    #[test]
    fn test_message_content_rejects_only_empty_string() {
        // テスト項目: 空文字だけが拒否され、空白のみのメッセージは受け付けられる
        // given (前提条件):
        let whitespace = ["   ", "\n\t", " "];

        // when (操作) / then (期待する結果):
        assert_eq!(
            MessageContent::new(String::new()),
            Err(ValueObjectError::EmptyContent)
        );
        for input in whitespace {
            assert_eq!(
                MessageContent::new(input.to_string()).unwrap().as_str(),
                input
            );
        }
    }

    #[test]
    fn test_message_content_rejects_too_long() {
        // テスト項目: 上限を超えるメッセージは拒否される
        // given (前提条件):
        let input = "x".repeat(MESSAGE_CONTENT_MAX_CHARS + 1);

        // when (操作):
        let result = MessageContent::new(input);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::ContentTooLong {
                len: MESSAGE_CONTENT_MAX_CHARS + 1,
                max: MESSAGE_CONTENT_MAX_CHARS,
            })
        );
    }

    #[test]
    fn test_email_validation() {
        // テスト項目: メールアドレスの形式が検証される
        // given (前提条件):
        let valid = ["alice@example.com", "a.b+chat@mail.example.jp"];
        let invalid = [
            "",
            "alice",
            "@example.com",
            "alice@",
            "alice@example",
            "a@b@c.com",
            "al ice@example.com",
        ];

        // when (操作) / then (期待する結果):
        for input in valid {
            assert_eq!(Email::new(input.to_string()).unwrap().as_str(), input);
        }
        for input in invalid {
            let result = Email::new(input.to_string());
            assert!(
                matches!(result, Err(ValueObjectError::InvalidEmail(_))),
                "{} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_password_minimum_length_and_redacted_debug() {
        // テスト項目: パスワードは6文字以上で、Debug 表示に平文が出ない
        // given (前提条件):
        let short = "12345".to_string();
        let ok = "123456".to_string();

        // when (操作):
        let rejected = Password::new(short);
        let accepted = Password::new(ok).unwrap();

        // then (期待する結果):
        assert_eq!(
            rejected,
            Err(ValueObjectError::PasswordTooShort {
                min: PASSWORD_MIN_CHARS
            })
        );
        assert_eq!(accepted.expose(), "123456");
        assert!(!format!("{:?}", accepted).contains("123456"));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件) / when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
