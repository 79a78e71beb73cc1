//! Mapping of application errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::{AuthError, UserStoreError},
    hub::HubError,
    infrastructure::dto::http::ErrorDto,
    usecase::{GetHistoryError, LoginError, RegisterUserError, SendMessageError},
};

/// Error returned by HTTP handlers; renders as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<SendMessageError> for ApiError {
    fn from(error: SendMessageError) -> Self {
        match error {
            SendMessageError::InvalidContent(e) => Self::BadRequest(e.to_string()),
            SendMessageError::HubUnavailable(e) => Self::Unavailable(e.to_string()),
            e @ (SendMessageError::Store(_) | SendMessageError::Encode(_)) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<GetHistoryError> for ApiError {
    fn from(error: GetHistoryError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl From<RegisterUserError> for ApiError {
    fn from(error: RegisterUserError) -> Self {
        match error {
            RegisterUserError::InvalidInput(e) => Self::BadRequest(e.to_string()),
            RegisterUserError::Store(
                e @ (UserStoreError::UsernameTaken(_) | UserStoreError::EmailTaken(_)),
            ) => Self::Conflict(e.to_string()),
            e @ (RegisterUserError::Store(_) | RegisterUserError::Credential(_)) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => Self::Unauthorized(AuthError::InvalidCredentials),
            e @ (LoginError::Store(_) | LoginError::Credential(_)) => Self::Internal(e.to_string()),
        }
    }
}

impl From<HubError> for ApiError {
    fn from(error: HubError) -> Self {
        Self::Unavailable(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
