use crate::shared::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(err.to_string())
    }
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Transport(msg) => AppError::Network(msg),
            RemoteError::Rejected { status, message } => {
                AppError::RemoteRejected(format!("status {status}: {message}"))
            }
            RemoteError::InvalidPayload(msg) => AppError::DeserializationError(msg),
        }
    }
}
