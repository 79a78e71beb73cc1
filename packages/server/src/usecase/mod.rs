//! UseCase 層: HTTP から呼ばれるアプリケーション操作

pub mod error;
pub mod get_history;
pub mod login;
pub mod register_user;
pub mod send_message;

pub use error::{GetHistoryError, LoginError, RegisterUserError, SendMessageError};
pub use get_history::GetHistoryUseCase;
pub use login::LoginUseCase;
pub use register_user::{RegisterInput, RegisterUserUseCase};
pub use send_message::SendMessageUseCase;

use crate::domain::{AuthError, UserAccount};

/// A signed-in account and the bearer token issued for it
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub account: UserAccount,
}

/// Run password hashing on the blocking pool
async fn hash_off_executor<T, F>(work: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::HashFailed(e.to_string()))?
}
