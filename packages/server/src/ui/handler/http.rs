//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{
        AuthResponseDto, LoginRequest, MessageRecordDto, ParticipantDto, ParticipantsDto,
        ProfileDto, RegisterRequest, SendMessageRequest,
    },
    ui::{auth::AuthenticatedUser, error::ApiError, state::AppState},
    usecase::RegisterInput,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "message": "Chat API is running"}))
}

/// Create an account and sign it in
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponseDto>), ApiError> {
    let session = state
        .register_user_usecase
        .execute(RegisterInput {
            username: request.username,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Exchange a username and password for a session token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponseDto>, ApiError> {
    let session = state
        .login_usecase
        .execute(request.username, request.password)
        .await?;

    Ok(Json(session.into()))
}

/// Identity behind the caller's token
pub async fn get_profile(AuthenticatedUser(identity): AuthenticatedUser) -> Json<ProfileDto> {
    Json(identity.into())
}

/// Recent history, oldest first
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MessageRecordDto>>, ApiError> {
    let records = state.get_history_usecase.execute().await?;

    // Domain Model から DTO への変換
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Persist a message and broadcast it to everyone connected
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageRecordDto>), ApiError> {
    let record = state
        .send_message_usecase
        .execute(identity, request.content)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Who is connected right now
pub async fn get_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ParticipantsDto>, ApiError> {
    let participants: Vec<ParticipantDto> = state
        .hub
        .participants()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ParticipantsDto {
        online: participants.len(),
        participants,
    }))
}
