//! Shared types for AmplifyHub
//!
//! Entity models, error codes, validation rules and derived statistics
//! used by the membership client and any host embedding it.

pub mod error;
pub mod models;
pub mod stats;
pub mod util;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
