//! UseCase: ログイン

use std::sync::Arc;

use crate::domain::{Password, PasswordHasher, TokenIssuer, UserRepository, Username};

use super::{AuthSession, error::LoginError, hash_off_executor};

/// ログインのユースケース
///
/// Unknown usernames and wrong passwords fail the same way, so callers cannot
/// tell which accounts exist.
pub struct LoginUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl LoginUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            issuer,
        }
    }

    /// ログインを実行し、成功すれば新しいセッショントークンを返す
    pub async fn execute(
        &self,
        username: String,
        password: String,
    ) -> Result<AuthSession, LoginError> {
        let (Ok(username), Ok(password)) = (Username::new(username), Password::new(password))
        else {
            return Err(LoginError::InvalidCredentials);
        };

        let Some(account) = self.users.find_by_username(&username).await? else {
            return Err(LoginError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.hasher);
        let hash = account.password_hash.clone();
        if !hash_off_executor(move || hasher.verify(&password, &hash)).await? {
            tracing::info!("Failed login for '{}'", account.username);
            return Err(LoginError::InvalidCredentials);
        }

        let token = self.issuer.issue(&account.identity())?;
        tracing::info!("User #{} '{}' logged in", account.id, account.username);
        Ok(AuthSession { token, account })
    }
}
