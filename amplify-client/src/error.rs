//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::remote::RemoteError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation failed; no remote call was made
    #[error(transparent)]
    Validation(#[from] AppError),

    /// The data service reported an error; displays its message verbatim
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The data service reported success but returned no rows
    #[error("no data returned")]
    EmptyResult,

    /// Lookup by id found nothing
    #[error("{0}")]
    NotFound(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Error code for hosts that branch on errors
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) => e.code,
            Self::Remote(e) => e
                .status
                .and_then(|s| http::StatusCode::from_u16(s).ok())
                .map(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::RemoteError),
            Self::EmptyResult => ErrorCode::EmptyResult,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Http(_) => ErrorCode::NetworkError,
        }
    }

    /// Text shown to the user for this failure
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
