//! Task record definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Field names assigned by the backend or fixed at creation.
///
/// `id` and `created_at` are assigned server-side; `user_id` is set once on
/// create and never changed afterwards.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "created_at", "user_id"];

/// A persisted task record.
///
/// The three core fields are required; everything else a task carries
/// (title, status, ...) travels in the open field set, flattened into the
/// same JSON object on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Input for creating a task.
///
/// Structurally excludes the backend-assigned `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl NewTask {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            fields: Map::new(),
        }
    }

    /// Set an additional task field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Reject reserved field names smuggled in through the open field set.
    ///
    /// Deserialization can place `id` or `created_at` into the flattened
    /// map, so the clients validate before building a request.
    pub(crate) fn validate(&self) -> Result<()> {
        reject_reserved(&self.fields, "supplied on create")
    }
}

/// Partial update for a task.
///
/// `id`, `user_id` and `created_at` cannot be changed through a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskPatch {
    fields: Map<String, Value>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to update
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        reject_reserved(&self.fields, "modified by an update")
    }
}

/// Acknowledgement returned by `delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

fn reject_reserved(fields: &Map<String, Value>, action: &str) -> Result<()> {
    for name in RESERVED_FIELDS {
        if fields.contains_key(name) {
            return Err(Error::InvalidInput(format!(
                "field `{name}` is reserved and cannot be {action}"
            )));
        }
    }
    Ok(())
}
