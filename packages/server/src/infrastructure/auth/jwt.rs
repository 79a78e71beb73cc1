//! HS256 JWT session authenticator.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, Identity, SessionAuthenticator, TokenIssuer, UserId, Username};

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies HS256-signed session tokens
pub struct JwtAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl JwtAuthenticator {
    /// Create an authenticator with the default 24h token lifetime
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, TimeDelta::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &[u8], ttl: TimeDelta) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issue a signed token for `identity`
    pub fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: identity.user_id.value(),
            username: identity.username.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::IssueFailed(e.to_string()))
    }
}

impl TokenIssuer for JwtAuthenticator {
    fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        JwtAuthenticator::issue(self, identity)
    }
}

impl SessionAuthenticator for JwtAuthenticator {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(Identity::new(
            UserId::new(data.claims.user_id)?,
            Username::new(data.claims.username)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-with-enough-entropy!";

    fn alice() -> Identity {
        Identity::new(
            UserId::new(1).unwrap(),
            Username::new("alice".to_string()).unwrap(),
        )
    }

    #[test]
    fn test_issued_token_verifies_to_same_identity() {
        // テスト項目: 発行したトークンを検証すると同じ Identity が得られる
        // given (前提条件):
        let auth = JwtAuthenticator::new(SECRET);
        let token = auth.issue(&alice()).unwrap();

        // when (操作):
        let identity = auth.verify(&token);

        // then (期待する結果):
        assert_eq!(identity, Ok(alice()));
    }

    #[test]
    fn test_token_issuer_port_issues_verifiable_token() {
        // テスト項目: TokenIssuer として発行したトークンも検証できる
        // given (前提条件):
        let auth = JwtAuthenticator::new(SECRET);
        let issuer: &dyn TokenIssuer = &auth;

        // when (操作):
        let token = issuer.issue(&alice()).unwrap();

        // then (期待する結果):
        assert_eq!(auth.verify(&token), Ok(alice()));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        // テスト項目: 異なる秘密鍵で署名されたトークンは拒否される
        // given (前提条件):
        let issuer = JwtAuthenticator::new(b"another-secret-another-secret!!!");
        let verifier = JwtAuthenticator::new(SECRET);
        let token = issuer.issue(&alice()).unwrap();

        // when (操作):
        let result = verifier.verify(&token);

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // テスト項目: 有効期限切れのトークンは拒否される
        // given (前提条件):
        // default validation leeway is 60s, so expire well before that
        let auth = JwtAuthenticator::with_ttl(SECRET, TimeDelta::minutes(-10));
        let token = auth.issue(&alice()).unwrap();

        // when (操作):
        let result = auth.verify(&token);

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_garbage_and_empty_tokens() {
        // テスト項目: 形式不正・空のトークンはそれぞれのエラーになる
        // given (前提条件):
        let auth = JwtAuthenticator::new(SECRET);

        // when (操作) / then (期待する結果):
        assert!(matches!(
            auth.verify("not.a.jwt"),
            Err(AuthError::InvalidToken(_))
        ));
        assert_eq!(auth.verify(""), Err(AuthError::MissingToken));
    }

    #[test]
    fn test_claims_with_invalid_username_are_rejected() {
        // テスト項目: 署名は正しくてもクレームの値が不正なら拒否される
        // given (前提条件):
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            username: "x".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        // when (操作):
        let result = JwtAuthenticator::new(SECRET).verify(&token);

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::InvalidClaims(_))));
    }
}
