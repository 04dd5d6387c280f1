//! Table backend interface
//!
//! Models the query surface of a managed database SDK: insert, select,
//! update and delete against a named table, filtered by column equality.
//! The SDK's `{data, error}` response pairs map onto [`BackendResult`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Error reported by a table backend
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a single backend query
pub type BackendResult = std::result::Result<Value, BackendError>;

/// Column-equality filter, the only filter shape the clients need
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    /// Match rows whose `column` equals `value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Query interface over a table-oriented storage backend
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Insert a row, returning the stored row with backend-assigned columns
    async fn insert(&self, table: &str, row: Value) -> BackendResult;

    /// Select all rows matching the filter, returned as a JSON array
    async fn select(&self, table: &str, filter: Filter) -> BackendResult;

    /// Update matching rows, returning the updated row
    async fn update(&self, table: &str, filter: Filter, changes: Value) -> BackendResult;

    /// Delete matching rows
    async fn delete(&self, table: &str, filter: Filter) -> BackendResult;
}

/// In-memory table backend
///
/// Assigns `id` and `created_at` on insert the way a hosted backend does
/// server-side. Rows keep insertion order. Useful as an injected test
/// double and for local runs.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(row: &Map<String, Value>, filter: &Filter) -> bool {
    row.get(filter.column.as_str()) == Some(&filter.value)
}

#[async_trait]
impl TableBackend for MemoryBackend {
    async fn insert(&self, table: &str, row: Value) -> BackendResult {
        let Value::Object(mut row) = row else {
            return Err(BackendError::new("insert expects a JSON object"));
        };
        row.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        row.insert("created_at".to_string(), json!(Utc::now()));

        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(Value::Object(row))
    }

    async fn select(&self, table: &str, filter: Filter) -> BackendResult {
        let tables = self.tables.read().await;
        let rows = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches(row, &filter))
                    .cloned()
                    .map(Value::Object)
                    .collect()
            })
            .unwrap_or_default();
        Ok(Value::Array(rows))
    }

    async fn update(&self, table: &str, filter: Filter, changes: Value) -> BackendResult {
        let Value::Object(changes) = changes else {
            return Err(BackendError::new("update expects a JSON object"));
        };

        let mut tables = self.tables.write().await;
        let mut updated = None;
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches(row, &filter)) {
                for (name, value) in &changes {
                    row.insert(name.clone(), value.clone());
                }
                updated = Some(row.clone());
            }
        }

        match updated {
            Some(row) => Ok(Value::Object(row)),
            None => Err(BackendError::new(format!(
                "no row matched {} = {}",
                filter.column, filter.value
            ))),
        }
    }

    async fn delete(&self, table: &str, filter: Filter) -> BackendResult {
        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| !matches(row, &filter));
        }
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_id_and_created_at() {
        let backend = MemoryBackend::new();

        let row = backend
            .insert("tasks", json!({"user_id": "u1", "title": "buy milk"}))
            .await
            .unwrap();

        assert!(row["id"].is_string());
        assert!(row["created_at"].is_string());
        assert_eq!(row["user_id"], json!("u1"));
        assert_eq!(row["title"], json!("buy milk"));
    }

    #[tokio::test]
    async fn test_insert_rejects_non_object() {
        let backend = MemoryBackend::new();

        let result = backend.insert("tasks", json!([1, 2, 3])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_select_filters_in_insertion_order() {
        let backend = MemoryBackend::new();
        backend
            .insert("tasks", json!({"user_id": "u1", "title": "first"}))
            .await
            .unwrap();
        backend
            .insert("tasks", json!({"user_id": "u2", "title": "other"}))
            .await
            .unwrap();
        backend
            .insert("tasks", json!({"user_id": "u1", "title": "second"}))
            .await
            .unwrap();

        let rows = backend
            .select("tasks", Filter::eq("user_id", "u1"))
            .await
            .unwrap();
        let rows = rows.as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], json!("first"));
        assert_eq!(rows[1]["title"], json!("second"));
    }

    #[tokio::test]
    async fn test_select_unknown_table_is_empty() {
        let backend = MemoryBackend::new();

        let rows = backend
            .select("tasks", Filter::eq("user_id", "u1"))
            .await
            .unwrap();
        assert_eq!(rows, json!([]));
    }

    #[tokio::test]
    async fn test_update_merges_changes() {
        let backend = MemoryBackend::new();
        let row = backend
            .insert("tasks", json!({"user_id": "u1", "title": "before"}))
            .await
            .unwrap();
        let id = row["id"].clone();

        let updated = backend
            .update(
                "tasks",
                Filter::eq("id", id.clone()),
                json!({"title": "after", "done": true}),
            )
            .await
            .unwrap();

        assert_eq!(updated["title"], json!("after"));
        assert_eq!(updated["done"], json!(true));
        assert_eq!(updated["id"], id);
        assert_eq!(updated["user_id"], json!("u1"));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_an_error() {
        let backend = MemoryBackend::new();

        let result = backend
            .update("tasks", Filter::eq("id", "missing"), json!({"title": "x"}))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_matching_rows() {
        let backend = MemoryBackend::new();
        let row = backend
            .insert("tasks", json!({"user_id": "u1"}))
            .await
            .unwrap();
        let id = row["id"].clone();

        backend
            .delete("tasks", Filter::eq("id", id.clone()))
            .await
            .unwrap();

        let rows = backend
            .select("tasks", Filter::eq("id", id))
            .await
            .unwrap();
        assert_eq!(rows, json!([]));

        // Deleting again is not an error
        let result = backend.delete("tasks", Filter::eq("id", "missing")).await;
        assert!(result.is_ok());
    }
}
