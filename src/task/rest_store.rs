//! REST storage client
//!
//! Issues plain HTTP requests against a task REST endpoint. Responses
//! are parsed as JSON without inspecting the status code; network and
//! body-parse failures surface as [`Error::Http`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::model::{DeleteAck, NewTask, Task, TaskPatch};
use super::repository::TaskRepository;
use crate::Result;

/// Connection settings for the REST client
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the task API, without trailing slash
    pub base_url: String,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

/// Task store backed by a plain REST endpoint
pub struct RestTaskStore {
    client: Client,
    config: RestConfig,
}

impl RestTaskStore {
    pub fn new(config: RestConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Use an externally configured HTTP client
    pub fn with_client(client: Client, config: RestConfig) -> Self {
        Self { client, config }
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/tasks/{}", self.config.base_url, urlencoding::encode(id))
    }
}

#[async_trait]
impl TaskRepository for RestTaskStore {
    async fn create(&self, task: NewTask) -> Result<Task> {
        task.validate()?;
        let url = format!("{}/tasks", self.config.base_url);
        debug!(%url, user_id = %task.user_id, "creating task");

        let task = self.client.post(url).json(&task).send().await?.json().await?;
        Ok(task)
    }

    async fn read(&self, user_id: &str) -> Result<Vec<Task>> {
        let url = format!(
            "{}/tasks?user_id={}",
            self.config.base_url,
            urlencoding::encode(user_id)
        );
        debug!(%url, "reading tasks");

        let tasks = self.client.get(url).send().await?.json().await?;
        Ok(tasks)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        patch.validate()?;
        let url = self.task_url(id);
        debug!(%url, "updating task");

        let task = self.client.put(url).json(&patch).send().await?.json().await?;
        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<DeleteAck> {
        let url = self.task_url(id);
        debug!(%url, "deleting task");

        let ack = self.client.delete(url).send().await?.json().await?;
        Ok(ack)
    }
}
