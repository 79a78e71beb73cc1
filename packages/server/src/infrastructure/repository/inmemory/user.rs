//! InMemory user repository 実装
//!
//! ドメイン層が定義する UserRepository trait の具体的な実装。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    NewUserAccount, UserAccount, UserId, UserRepository, UserStoreError, Username,
};

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<UserAccount>,
    next_id: i64,
}

/// インメモリ UserRepository 実装
///
/// Ids are assigned in registration order starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts
    pub async fn len(&self) -> usize {
        self.inner.lock().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, account: NewUserAccount) -> Result<UserAccount, UserStoreError> {
        let mut inner = self.inner.lock().await;

        if inner.accounts.iter().any(|a| a.username == account.username) {
            return Err(UserStoreError::UsernameTaken(account.username.into_string()));
        }
        if inner.accounts.iter().any(|a| a.email == account.email) {
            return Err(UserStoreError::EmailTaken(account.email.to_string()));
        }

        let id = UserId::new(inner.next_id + 1)
            .map_err(|e| UserStoreError::Unavailable(e.to_string()))?;
        inner.next_id = id.value();
        let created = UserAccount::from_new(id, account);
        inner.accounts.push(created.clone());
        tracing::debug!("Registered user #{} '{}'", created.id, created.username);

        Ok(created)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserStoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .accounts
            .iter()
            .find(|a| &a.username == username)
            .cloned())
    }
}
