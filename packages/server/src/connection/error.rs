use std::time::Duration;

use thiserror::Error;

use crate::hub::HubError;

/// Why a connection's read or write side stopped
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("read failed: {0}")]
    Read(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("write did not complete within {0:?}")]
    WriteTimeout(Duration),

    #[error("no pong received within {0:?}")]
    LivenessTimeout(Duration),

    #[error(transparent)]
    Hub(#[from] HubError),
}
