//! Task repository trait
//!
//! Defines the interface shared by both storage clients.

use async_trait::async_trait;

use super::model::{DeleteAck, NewTask, Task, TaskPatch};
use crate::Result;

/// Repository interface for task CRUD operations
///
/// Both the table-backend client and the REST client implement this, so
/// callers can swap transports without touching call sites.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task. The backend assigns `id` and `created_at`.
    async fn create(&self, task: NewTask) -> Result<Task>;

    /// Fetch all tasks owned by the given user, in backend order
    async fn read(&self, user_id: &str) -> Result<Vec<Task>>;

    /// Apply a partial update to the task with the given id
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task>;

    /// Remove the task with the given id
    async fn delete(&self, id: &str) -> Result<DeleteAck>;
}
