//! Member custom fields
//!
//! Extension map attached to a member. Each entry is keyed by the field
//! name of a [`CustomFieldDefinition`] and must match its declared kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};

/// Custom field values keyed by field name
pub type CustomFields = BTreeMap<String, CustomFieldValue>;

/// Declared type of a custom field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CustomFieldKind {
    /// Free text
    Text,
    /// List of free-text tags
    Tags,
    /// One value out of a fixed option list
    Select { options: Vec<String> },
}

/// Value stored for a custom field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomFieldValue {
    Text(String),
    Tags(Vec<String>),
}

impl CustomFieldValue {
    /// Build a tag value from comma-separated input (`"a, b,,c"` -> `[a, b, c]`)
    pub fn tags_from_input(input: &str) -> Self {
        Self::Tags(parse_tags(input))
    }
}

/// Split comma-separated tag input, trimming pieces and dropping blanks
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Definition of a custom member field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldDefinition {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: CustomFieldKind,
}

impl CustomFieldDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CustomFieldKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// Check a value against this definition's kind
    pub fn check(&self, value: &CustomFieldValue) -> AppResult<()> {
        match (&self.kind, value) {
            (CustomFieldKind::Text, CustomFieldValue::Text(_))
            | (CustomFieldKind::Tags, CustomFieldValue::Tags(_)) => Ok(()),
            (CustomFieldKind::Select { options }, CustomFieldValue::Text(v)) => {
                if options.iter().any(|o| o == v) {
                    Ok(())
                } else {
                    Err(AppError::new(ErrorCode::CustomFieldOptionInvalid)
                        .with_detail("field", self.name.clone())
                        .with_detail("value", v.clone()))
                }
            }
            _ => Err(AppError::new(ErrorCode::CustomFieldTypeMismatch)
                .with_detail("field", self.name.clone())),
        }
    }
}

/// Check every entry of `fields` against `definitions`.
///
/// Entries without a definition are rejected.
pub fn validate_custom_fields(
    definitions: &[CustomFieldDefinition],
    fields: &CustomFields,
) -> AppResult<()> {
    for (name, value) in fields {
        let definition = definitions
            .iter()
            .find(|d| &d.name == name)
            .ok_or_else(|| {
                AppError::new(ErrorCode::CustomFieldUnknown).with_detail("field", name.clone())
            })?;
        definition.check(value)?;
    }
    Ok(())
}
