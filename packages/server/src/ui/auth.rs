//! Credential extraction for HTTP and WebSocket requests.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::{
    domain::{AuthError, Identity},
    ui::{error::ApiError, state::AppState},
};

const BEARER_PREFIX: &str = "Bearer ";

/// Token carried in an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or(AuthError::InvalidFormat)
}

/// Pick the credential for a WebSocket handshake.
///
/// Browsers cannot set headers on a WebSocket request, so a `token` query
/// parameter is accepted and takes precedence over the header.
pub fn handshake_token<'a>(
    query_token: Option<&'a str>,
    headers: &'a HeaderMap,
) -> Result<&'a str, AuthError> {
    match query_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => bearer_token(headers),
    }
}

/// Identity of the caller, verified from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let identity = state.authenticator.verify(token)?;
        Ok(Self(identity))
    }
}
