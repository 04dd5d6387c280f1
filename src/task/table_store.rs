//! Table-backend storage client
//!
//! Drives a table backend through its query interface. Backend failures
//! are logged and surfaced as [`Error::Backend`].

use async_trait::async_trait;
use tracing::error;

use super::backend::{BackendError, Filter, TableBackend};
use super::model::{DeleteAck, NewTask, Task, TaskPatch};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// Table this client operates on
const TASKS_TABLE: &str = "tasks";

/// Task store backed by a table-oriented backend SDK
///
/// The backend is injected so tests can substitute a double.
pub struct TableTaskStore<B> {
    backend: B,
}

impl<B: TableBackend> TableTaskStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn backend_failure(op: &str, err: BackendError) -> Error {
        error!(error = %err, "error {op} task");
        Error::Backend(err)
    }
}

#[async_trait]
impl<B: TableBackend> TaskRepository for TableTaskStore<B> {
    async fn create(&self, task: NewTask) -> Result<Task> {
        task.validate()?;
        let row = serde_json::to_value(&task)?;
        let data = self
            .backend
            .insert(TASKS_TABLE, row)
            .await
            .map_err(|e| Self::backend_failure("creating", e))?;
        Ok(serde_json::from_value(data)?)
    }

    async fn read(&self, user_id: &str) -> Result<Vec<Task>> {
        let data = self
            .backend
            .select(TASKS_TABLE, Filter::eq("user_id", user_id))
            .await
            .map_err(|e| Self::backend_failure("reading", e))?;
        Ok(serde_json::from_value(data)?)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        patch.validate()?;
        let changes = serde_json::to_value(&patch)?;
        let data = self
            .backend
            .update(TASKS_TABLE, Filter::eq("id", id), changes)
            .await
            .map_err(|e| Self::backend_failure("updating", e))?;
        Ok(serde_json::from_value(data)?)
    }

    async fn delete(&self, id: &str) -> Result<DeleteAck> {
        self.backend
            .delete(TASKS_TABLE, Filter::eq("id", id))
            .await
            .map_err(|e| Self::backend_failure("deleting", e))?;
        Ok(DeleteAck {
            message: "Task deleted successfully".to_string(),
        })
    }
}
