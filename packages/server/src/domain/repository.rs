//! Persistence gateway traits
//!
//! ドメイン層が必要とするチャット履歴ストアとアカウントストアへのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ChatMessage, MessageRecord, NewUserAccount, StoreError, UserAccount, UserStoreError, Username,
};

/// Durable store for chat history
///
/// The hub calls `append` fire-and-forget after a successful broadcast; the
/// HTTP send path calls it synchronously. `recent` is only used by history
/// retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a message and return the stored record
    async fn append(&self, message: ChatMessage) -> Result<MessageRecord, StoreError>;

    /// The last `limit` messages, oldest first
    async fn recent(&self, limit: usize) -> Result<Vec<MessageRecord>, StoreError>;
}

/// Registered accounts
///
/// Usernames and emails are unique across all accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account and assign its id
    async fn create(&self, account: NewUserAccount) -> Result<UserAccount, UserStoreError>;

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserStoreError>;
}
