//! Remote data client
//!
//! A generic table interface over the hosted data service. Every call
//! returns either the affected rows or a [`RemoteError`] descriptor.

mod memory;
mod rest;

pub use memory::{MemoryTableClient, Operation, RemoteCall};
pub use rest::RestTableClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One table row as returned by the data service
pub type Row = Value;

/// Result type for table operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Error descriptor reported by the data service
///
/// Mirrors the PostgREST error body: `message` is always present and is the
/// text surfaced to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// HTTP status of the failed response, when there was one
    #[serde(skip)]
    pub status: Option<u16>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
            hint: None,
            status: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Equality filter over row columns (`column = value` for every condition)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::default().and_eq(column, value)
    }

    pub fn and_eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// PostgREST query pairs (`column=eq.value`)
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.conditions
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{value}")))
            .collect()
    }

    /// Whether a row satisfies every condition
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions.iter().all(|(column, expected)| match row.get(column) {
            Some(Value::String(s)) => s == expected,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == *expected,
        })
    }
}

/// Table operations offered by the data service
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Read every row matching `filter` (all rows when `None`)
    async fn select(&self, table: &str, filter: Option<&Filter>) -> RemoteResult<Vec<Row>>;

    /// Insert rows; returns the rows as stored
    async fn insert(&self, table: &str, rows: Vec<Row>) -> RemoteResult<Vec<Row>>;

    /// Merge `patch` into every row matching `filter`; returns the updated rows
    async fn update(&self, table: &str, filter: &Filter, patch: Row) -> RemoteResult<Vec<Row>>;

    /// Delete every row matching `filter`; returns the removed rows
    async fn delete(&self, table: &str, filter: &Filter) -> RemoteResult<Vec<Row>>;
}

/// Encode a typed record as a row
pub fn encode_row<T: Serialize>(value: &T) -> RemoteResult<Row> {
    serde_json::to_value(value)
        .map_err(|e| RemoteError::new(format!("Failed to encode row: {e}")))
}

/// Decode rows into typed records
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> RemoteResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| RemoteError::new(format!("Invalid row returned: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matches_strings_and_numbers() {
        let row = json!({ "id": "tier-basic", "price": 10, "name": null });
        assert!(Filter::eq("id", "tier-basic").matches(&row));
        assert!(Filter::eq("id", "tier-basic").and_eq("price", "10").matches(&row));
        assert!(!Filter::eq("id", "tier-vip").matches(&row));
        assert!(!Filter::eq("name", "null").matches(&row));
        assert!(!Filter::eq("missing", "x").matches(&row));
    }

    #[test]
    fn test_filter_query_pairs() {
        let pairs = Filter::eq("id", "42").and_eq("email", "a@b.c").to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("id".to_string(), "eq.42".to_string()),
                ("email".to_string(), "eq.a@b.c".to_string())
            ]
        );
    }

    #[test]
    fn test_remote_error_body() {
        let err: RemoteError = serde_json::from_str(
            r#"{"message":"duplicate key value","code":"23505","details":null}"#,
        )
        .unwrap();
        assert_eq!(err.to_string(), "duplicate key value");
        assert_eq!(err.code.as_deref(), Some("23505"));
        assert_eq!(err.status, None);
    }

    #[test]
    fn test_decode_rows_reports_bad_rows() {
        let rows = vec![json!({ "id": "p1", "description": "Forum" }), json!({ "id": 3 })];
        let err = decode_rows::<shared::models::Perk>(rows).unwrap_err();
        assert!(err.message.starts_with("Invalid row returned"));
    }
}
