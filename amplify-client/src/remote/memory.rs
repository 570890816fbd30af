//! In-memory table client
//!
//! Backs collections that are not persisted remotely yet, and serves as
//! the data service in tests. Calls are recorded, and the next call of a
//! given operation can be scripted to fail, return no rows, or wait for a
//! release signal before completing.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, Notify, RwLock};

use super::{Filter, RemoteError, RemoteResult, Row, TableClient};

/// Table operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    pub operation: Operation,
    pub table: String,
}

#[derive(Debug)]
enum Scripted {
    Fail(RemoteError),
    Empty,
    Hold(Arc<Notify>),
}

type Tables = HashMap<String, Vec<Row>>;

/// In-process implementation of [`TableClient`]
#[derive(Debug, Default)]
pub struct MemoryTableClient {
    tables: RwLock<Tables>,
    calls: Mutex<Vec<RemoteCall>>,
    scripts: Mutex<HashMap<Operation, VecDeque<Scripted>>>,
}

impl MemoryTableClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows
    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<Row>) -> Self {
        self.tables.get_mut().insert(table.into(), rows);
        self
    }

    /// Current rows of a table
    pub async fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.read().await.get(table).cloned().unwrap_or_default()
    }

    /// Every call made so far, oldest first
    pub async fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Make the next `operation` call fail with `error`
    pub async fn fail_next(&self, operation: Operation, error: RemoteError) {
        self.script(operation, Scripted::Fail(error)).await;
    }

    /// Make the next `operation` call succeed without touching data or returning rows
    pub async fn empty_next(&self, operation: Operation) {
        self.script(operation, Scripted::Empty).await;
    }

    /// Make the next `operation` call wait until the returned handle is notified.
    ///
    /// The call's result is computed before it starts waiting.
    pub async fn hold_next(&self, operation: Operation) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.script(operation, Scripted::Hold(gate.clone())).await;
        gate
    }

    async fn script(&self, operation: Operation, scripted: Scripted) {
        self.scripts
            .lock()
            .await
            .entry(operation)
            .or_default()
            .push_back(scripted);
    }

    async fn run<F>(&self, operation: Operation, table: &str, apply: F) -> RemoteResult<Vec<Row>>
    where
        F: FnOnce(&mut Tables) -> RemoteResult<Vec<Row>> + Send,
    {
        self.calls.lock().await.push(RemoteCall {
            operation,
            table: table.to_string(),
        });
        let script = self
            .scripts
            .lock()
            .await
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);

        let result = match &script {
            Some(Scripted::Fail(error)) => Err(error.clone()),
            Some(Scripted::Empty) => Ok(Vec::new()),
            _ => {
                let mut tables = self.tables.write().await;
                apply(&mut tables)
            }
        };

        if let Some(Scripted::Hold(gate)) = script {
            gate.notified().await;
        }
        result
    }
}

fn merge(row: &mut Row, patch: &Row) {
    if let (Value::Object(target), Value::Object(fields)) = (row, patch) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait]
impl TableClient for MemoryTableClient {
    async fn select(&self, table: &str, filter: Option<&Filter>) -> RemoteResult<Vec<Row>> {
        self.run(Operation::Select, table, |tables| {
            let rows = tables.get(table).map(Vec::as_slice).unwrap_or_default();
            Ok(rows
                .iter()
                .filter(|row| filter.is_none_or(|f| f.matches(row)))
                .cloned()
                .collect())
        })
        .await
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> RemoteResult<Vec<Row>> {
        self.run(Operation::Insert, table, |tables| {
            let existing = tables.entry(table.to_string()).or_default();
            for row in &rows {
                let Some(id) = row.get("id").filter(|id| !id.is_null()) else {
                    continue;
                };
                if existing.iter().any(|r| r.get("id") == Some(id)) {
                    return Err(RemoteError::new(format!(
                        "duplicate key value violates unique constraint \"{table}_pkey\""
                    ))
                    .with_code("23505")
                    .with_status(409));
                }
            }
            existing.extend(rows.iter().cloned());
            Ok(rows)
        })
        .await
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Row) -> RemoteResult<Vec<Row>> {
        if !patch.is_object() {
            return Err(RemoteError::new("update payload must be an object").with_status(400));
        }
        self.run(Operation::Update, table, |tables| {
            let mut updated = Vec::new();
            if let Some(rows) = tables.get_mut(table) {
                for row in rows.iter_mut().filter(|r| filter.matches(r)) {
                    merge(row, &patch);
                    updated.push(row.clone());
                }
            }
            Ok(updated)
        })
        .await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> RemoteResult<Vec<Row>> {
        self.run(Operation::Delete, table, |tables| {
            let Some(rows) = tables.get_mut(table) else {
                return Ok(Vec::new());
            };
            let (removed, kept): (Vec<Row>, Vec<Row>) = std::mem::take(rows)
                .into_iter()
                .partition(|r| filter.matches(r));
            *rows = kept;
            Ok(removed)
        })
        .await
    }
}
