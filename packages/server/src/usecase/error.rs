//! UseCase 層のエラー型

use thiserror::Error;

use crate::{
    domain::{AuthError, StoreError, UserStoreError, ValueObjectError},
    hub::HubError,
    infrastructure::codec::EncodeError,
};

/// メッセージ送信のエラー
#[derive(Debug, Error)]
pub enum SendMessageError {
    #[error("invalid message: {0}")]
    InvalidContent(#[from] ValueObjectError),

    #[error("failed to store message: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("chat hub is unavailable: {0}")]
    HubUnavailable(#[from] HubError),
}

/// 履歴取得のエラー
#[derive(Debug, Error)]
pub enum GetHistoryError {
    #[error("failed to load history: {0}")]
    Store(#[from] StoreError),
}

/// アカウント登録のエラー
#[derive(Debug, Error)]
pub enum RegisterUserError {
    #[error("invalid registration: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error(transparent)]
    Store(#[from] UserStoreError),

    #[error(transparent)]
    Credential(#[from] AuthError),
}

/// ログインのエラー
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] UserStoreError),

    #[error(transparent)]
    Credential(#[from] AuthError),
}
