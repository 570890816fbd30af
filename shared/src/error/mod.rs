//! Unified error system for AmplifyHub
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::MemberNotFound);
//! assert_eq!(err.message, "Member not found.");
//!
//! let err = AppError::required("email");
//! assert_eq!(err.field(), Some("email"));
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
