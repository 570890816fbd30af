//! Member Model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::custom_field::CustomFields;
use crate::error::{AppError, ErrorCode};

/// Membership level
///
/// Serialized with the exact spellings `Basic`, `Premium` and `VIP`;
/// any other string fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum MembershipLevel {
    #[default]
    Basic,
    Premium,
    #[serde(rename = "VIP")]
    Vip,
}

impl MembershipLevel {
    /// All levels in display order
    pub const ALL: [MembershipLevel; 3] = [Self::Basic, Self::Premium, Self::Vip];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Premium => "Premium",
            Self::Vip => "VIP",
        }
    }
}

impl fmt::Display for MembershipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                AppError::new(ErrorCode::InvalidMembershipLevel).with_detail("value", s)
            })
    }
}

/// Member entity, one row of the remote member table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub membership_level: MembershipLevel,
    /// Creation time; no update payload can change it
    pub join_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "CustomFields::is_empty")]
    pub custom_fields: CustomFields,
}

impl Member {
    /// Build the row inserted for an add-member submission.
    ///
    /// The id is generated client-side and `join_date` is stamped now.
    pub fn from_create(data: MemberCreate) -> Self {
        Self {
            id: crate::util::new_id(),
            name: data.name,
            email: data.email,
            membership_level: data.membership_level,
            join_date: crate::util::now(),
            custom_fields: CustomFields::new(),
        }
    }

    /// Apply a quick-edit patch; fields absent from the patch keep their value
    pub fn apply(&mut self, patch: &MemberUpdate) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(level) = patch.membership_level {
            self.membership_level = level;
        }
        if let Some(fields) = &patch.custom_fields {
            self.custom_fields = fields.clone();
        }
    }
}

/// Add-member form payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub membership_level: MembershipLevel,
}

impl MemberCreate {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        membership_level: MembershipLevel,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            membership_level,
        }
    }
}

/// Update member payload (quick edit / profile save)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_level: Option<MembershipLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<CustomFields>,
}

impl MemberUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn membership_level(mut self, level: MembershipLevel) -> Self {
        self.membership_level = Some(level);
        self
    }

    pub fn custom_fields(mut self, fields: CustomFields) -> Self {
        self.custom_fields = Some(fields);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.membership_level.is_none()
            && self.custom_fields.is_none()
    }
}
