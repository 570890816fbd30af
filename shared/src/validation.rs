//! Input validation rules
//!
//! Every form submission runs through these checks before any remote call
//! is attempted. Whitespace-only text counts as empty. Presence, the tier
//! price floor and the sign-up password rules are the whole check set:
//! text length and perk contents are not restricted.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{MemberCreate, MemberUpdate, SignUpRequest, TierDraft};

/// Minimum sign-up password length
pub const MIN_PASSWORD_LEN: usize = 6;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty.
pub fn validate_required_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    Ok(())
}

// ── Entity rules ────────────────────────────────────────────────────

/// Add-member form: name and email required
pub fn validate_member_create(data: &MemberCreate) -> AppResult<()> {
    validate_required_text(&data.name, "name")?;
    validate_required_text(&data.email, "email")?;
    Ok(())
}

/// Quick-edit patch: fields that are present must still be non-empty
pub fn validate_member_update(data: &MemberUpdate) -> AppResult<()> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name")?;
    }
    if let Some(email) = &data.email {
        validate_required_text(email, "email")?;
    }
    Ok(())
}

/// Tier form: name required, price present and at least zero.
///
/// Returns the accepted price.
pub fn validate_tier_draft(data: &TierDraft) -> AppResult<f64> {
    if data.name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::TierInvalidForm).with_detail("field", "name"));
    }
    match data.price {
        Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(AppError::new(ErrorCode::TierInvalidForm).with_detail("field", "price")),
    }
}

/// Sign-up form: matching passwords, minimum length
pub fn validate_sign_up(data: &SignUpRequest) -> AppResult<()> {
    validate_required_text(&data.email, "email")?;
    if data.password != data.confirm_password {
        return Err(AppError::new(ErrorCode::PasswordMismatch));
    }
    if data.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    Ok(())
}
