//! Data models
//!
//! Members and tiers are independent collections: a member's
//! `membership_level` is not tied to any tier's `name`.

pub mod account;
pub mod custom_field;
pub mod member;
pub mod tier;

pub use account::SignUpRequest;
pub use custom_field::{
    CustomFieldDefinition, CustomFieldKind, CustomFieldValue, CustomFields, parse_tags,
    validate_custom_fields,
};
pub use member::{Member, MemberCreate, MemberUpdate, MembershipLevel};
pub use tier::{Perk, Tier, TierDraft, default_tiers};
