//! Unified error codes for AmplifyHub
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Account errors
//! - 2xxx: Permission errors
//! - 3xxx: Member errors
//! - 4xxx: Tier errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so hosts written in other
/// languages can match on them without string parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Account ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Password and confirmation differ
    PasswordMismatch = 1003,
    /// Password too short
    PasswordTooShort = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Member ====================
    /// Member not found
    MemberNotFound = 3001,
    /// Member id missing from the request
    MemberIdMissing = 3002,
    /// Membership level is not one of Basic / Premium / VIP
    InvalidMembershipLevel = 3003,
    /// Custom field has no definition
    CustomFieldUnknown = 3004,
    /// Custom field value does not match its declared kind
    CustomFieldTypeMismatch = 3005,
    /// Custom field value is not one of the declared options
    CustomFieldOptionInvalid = 3006,

    // ==================== 4xxx: Tier ====================
    /// Tier not found
    TierNotFound = 4001,
    /// Tier form is missing its name or a price of 0 or more
    TierInvalidForm = 4002,

    // ==================== 9xxx: System ====================
    /// Remote data service reported an error
    RemoteError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Remote call succeeded without returning rows
    EmptyResult = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Account
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::PasswordMismatch => "Passwords do not match.",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters long.",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Member
            ErrorCode::MemberNotFound => "Member not found.",
            ErrorCode::MemberIdMissing => "No member ID provided.",
            ErrorCode::InvalidMembershipLevel => "Membership level must be Basic, Premium or VIP",
            ErrorCode::CustomFieldUnknown => "Custom field is not defined",
            ErrorCode::CustomFieldTypeMismatch => "Custom field value has the wrong type",
            ErrorCode::CustomFieldOptionInvalid => "Custom field value is not an allowed option",

            // Tier
            ErrorCode::TierNotFound => "Tier not found",
            ErrorCode::TierInvalidForm => "Please fill in name and a valid price (0 or more).",

            // System
            ErrorCode::RemoteError => "Remote data service error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Request timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::EmptyResult => "no data returned",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Account
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::PasswordMismatch),
            1004 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Member
            3001 => Ok(ErrorCode::MemberNotFound),
            3002 => Ok(ErrorCode::MemberIdMissing),
            3003 => Ok(ErrorCode::InvalidMembershipLevel),
            3004 => Ok(ErrorCode::CustomFieldUnknown),
            3005 => Ok(ErrorCode::CustomFieldTypeMismatch),
            3006 => Ok(ErrorCode::CustomFieldOptionInvalid),

            // Tier
            4001 => Ok(ErrorCode::TierNotFound),
            4002 => Ok(ErrorCode::TierInvalidForm),

            // System
            9002 => Ok(ErrorCode::RemoteError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::EmptyResult),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
