//! UseCase: アカウント登録
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterUserUseCase::execute() メソッド
//! - 入力検証 → ハッシュ化 → 保存 → トークン発行 の順序
//!
//! ### どのような状況を想定しているか
//! - 正常系：平文ではなくハッシュが保存され、発行されたトークンが返る
//! - 異常系：入力不正（ハッシュ化もしない）、ユーザー名の重複

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    Email, NewUserAccount, Password, PasswordHasher, TokenIssuer, UserRepository, Username,
};

use super::{AuthSession, error::RegisterUserError, hash_off_executor};

/// 登録フォームの入力
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// アカウント登録のユースケース
pub struct RegisterUserUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl RegisterUserUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            issuer,
            clock,
        }
    }

    /// アカウント登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(AuthSession)` - 作成されたアカウントとそのセッショントークン
    /// * `Err(RegisterUserError)` - 入力不正・重複・保存やトークン発行の失敗
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthSession, RegisterUserError> {
        // 1. 入力検証
        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;
        let password = Password::new(input.password)?;

        // 2. パスワードのハッシュ化
        let hasher = Arc::clone(&self.hasher);
        let password_hash = hash_off_executor(move || hasher.hash(&password)).await?;

        // 3. 保存
        let account = self
            .users
            .create(NewUserAccount {
                username,
                email,
                password_hash,
                created_at: self.clock.now(),
            })
            .await?;

        // 4. トークン発行
        let token = self.issuer.issue(&account.identity())?;

        tracing::info!("Registered user #{} '{}'", account.id, account.username);
        Ok(AuthSession { token, account })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            AuthError, MockPasswordHasher, MockTokenIssuer, MockUserRepository, UserStoreError,
            ValueObjectError,
        },
        infrastructure::repository::InMemoryUserRepository,
    };
    use hiroba_shared::time::FixedClock;

    fn input(username: &str, email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn stub_hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|password| Ok(format!("hashed:{}", password.expose().len())));
        hasher
    }

    fn stub_issuer() -> MockTokenIssuer {
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_issue()
            .returning(|identity| Ok(format!("token-for-{}", identity.user_id)));
        issuer
    }

    fn usecase(
        users: Arc<dyn UserRepository>,
        hasher: MockPasswordHasher,
        issuer: MockTokenIssuer,
    ) -> RegisterUserUseCase {
        RegisterUserUseCase::new(
            users,
            Arc::new(hasher),
            Arc::new(issuer),
            Arc::new(FixedClock::from_millis(1_700_000_000_000)),
        )
    }

    #[tokio::test]
    async fn test_register_stores_hash_and_returns_token() {
        // テスト項目: 登録するとハッシュ化したパスワードが保存され、トークンが返る
        // given (前提条件):
        let users = Arc::new(InMemoryUserRepository::new());
        let usecase = usecase(users.clone(), stub_hasher(), stub_issuer());

        // when (操作):
        let session = usecase
            .execute(input("alice", "alice@example.com", "secret-pass"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(session.token, "token-for-1");
        assert_eq!(session.account.username.as_str(), "alice");
        assert_eq!(session.account.password_hash, "hashed:11");
        assert_eq!(session.account.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_hashing() {
        // テスト項目: 入力が不正な場合はハッシュ化も保存もしない
        // given (前提条件):
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();
        let mut users = MockUserRepository::new();
        users.expect_create().never();
        let usecase = usecase(Arc::new(users), hasher, MockTokenIssuer::new());

        // when (操作):
        let bad_name = usecase.execute(input("al", "al@example.com", "secret-pass")).await;
        let bad_email = usecase.execute(input("alice", "not-an-email", "secret-pass")).await;
        let bad_password = usecase.execute(input("alice", "alice@example.com", "123")).await;

        // then (期待する結果):
        assert!(matches!(
            bad_name,
            Err(RegisterUserError::InvalidInput(ValueObjectError::InvalidUsername(_)))
        ));
        assert!(matches!(
            bad_email,
            Err(RegisterUserError::InvalidInput(ValueObjectError::InvalidEmail(_)))
        ));
        assert!(matches!(
            bad_password,
            Err(RegisterUserError::InvalidInput(ValueObjectError::PasswordTooShort { .. }))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_reported() {
        // テスト項目: 既に使われているユーザー名では登録できず、トークンも発行されない
        // given (前提条件):
        let users = Arc::new(InMemoryUserRepository::new());
        usecase(users.clone(), stub_hasher(), stub_issuer())
            .execute(input("alice", "alice@example.com", "secret-pass"))
            .await
            .unwrap();
        let mut issuer = MockTokenIssuer::new();
        issuer.expect_issue().never();
        let usecase = usecase(users.clone(), stub_hasher(), issuer);

        // when (操作):
        let result = usecase
            .execute(input("alice", "another@example.com", "secret-pass"))
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(RegisterUserError::Store(UserStoreError::UsernameTaken(_)))
        ));
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn test_hashing_failure_is_reported() {
        // テスト項目: ハッシュ化の失敗はそのまま報告され、何も保存されない
        // given (前提条件):
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(AuthError::HashFailed("out of memory".to_string())));
        let users = Arc::new(InMemoryUserRepository::new());
        let usecase = usecase(users.clone(), hasher, MockTokenIssuer::new());

        // when (操作):
        let result = usecase
            .execute(input("alice", "alice@example.com", "secret-pass"))
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(RegisterUserError::Credential(AuthError::HashFailed(_)))
        ));
        assert!(users.is_empty().await);
    }
}
