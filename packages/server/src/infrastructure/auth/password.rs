//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::domain::{AuthError, Password, PasswordHasher};

/// Hashes passwords with Argon2id and the crate's recommended parameters.
///
/// Hashes are stored in PHC string format, which carries the salt and
/// parameters alongside the digest.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::HashFailed(e.to_string()))
    }

    fn verify(&self, password: &Password, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashFailed(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(value: &str) -> Password {
        Password::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        // テスト項目: ハッシュ化したパスワードが正しいときだけ一致する
        // given (前提条件):
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash(&password("correct-horse")).unwrap();

        // when (操作):
        let right = hasher.verify(&password("correct-horse"), &hash);
        let wrong = hasher.verify(&password("wrong-horse"), &hash);

        // then (期待する結果):
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct-horse"));
        assert_eq!(right, Ok(true));
        assert_eq!(wrong, Ok(false));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        // テスト項目: 同じパスワードでも毎回異なるハッシュになり、どちらも検証できる
        // given (前提条件):
        let hasher = Argon2PasswordHasher::new();

        // when (操作):
        let first = hasher.hash(&password("same-password")).unwrap();
        let second = hasher.hash(&password("same-password")).unwrap();

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(hasher.verify(&password("same-password"), &first), Ok(true));
        assert_eq!(hasher.verify(&password("same-password"), &second), Ok(true));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        // テスト項目: PHC 形式でないハッシュとの照合はエラーになる
        // given (前提条件):
        let hasher = Argon2PasswordHasher::new();

        // when (操作):
        let result = hasher.verify(&password("whatever"), "not-a-phc-string");

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::HashFailed(_))));
    }
}
