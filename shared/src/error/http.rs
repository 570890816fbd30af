//! Classification of HTTP statuses returned by the data service

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Classify an HTTP status returned by the remote data service
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            s if s.is_success() => Self::Success,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::InvalidRequest,
            StatusCode::UNAUTHORIZED => Self::NotAuthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::AlreadyExists,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::TimeoutError,
            _ => Self::RemoteError,
        }
    }
}
