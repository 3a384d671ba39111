use thiserror::Error;

use super::{HttpError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

impl AppError {
    #[must_use]
    pub const fn validation(err: ValidationError) -> Self {
        AppError::Validation(err)
    }

    #[must_use]
    pub const fn http(err: HttpError) -> Self {
        AppError::Http(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
