//! Task service trait.
//!
//! The classification lifecycle in `qsketch-client` only needs the three
//! operations below. Keeping them behind a trait lets tests drive the
//! submit/poll state machine with a scripted in-memory service instead of a
//! live HTTP endpoint.

use async_trait::async_trait;

use crate::client::TasksClient;
use crate::error::ApiResult;
use crate::types::{
    CreateTaskRequest, CreateTaskResponse, HealthResponse, TaskId, TaskStatusResponse,
};

/// Interface to the classification task service.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Enqueue a classification task, returning its identifier.
    async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<CreateTaskResponse>;

    /// Fetch the current status of a task.
    async fn task_status(&self, task_id: &TaskId) -> ApiResult<TaskStatusResponse>;

    /// Check service liveness.
    async fn health(&self) -> ApiResult<HealthResponse>;
}

#[async_trait]
impl TaskService for TasksClient {
    async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<CreateTaskResponse> {
        TasksClient::create_task(self, request).await
    }

    async fn task_status(&self, task_id: &TaskId) -> ApiResult<TaskStatusResponse> {
        TasksClient::task_status(self, task_id).await
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        TasksClient::health(self).await
    }
}
