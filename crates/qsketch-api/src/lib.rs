//! REST client for the classification task service.
//!
//! The service exposes a minimal asynchronous job API:
//!
//! ```text
//! POST /tasks              { img, backend }  →  201 { task_id }
//! GET  /tasks/{task_id}                      →  { task_status, task_result }
//! GET  /                                     →  { status: "ok" }
//! ```
//!
//! A task is terminal only when `task_status == "SUCCESS"`; every other
//! status string means "not yet done" and callers are expected to poll.
//!
//! [`TasksClient`] is the HTTP implementation. The [`TaskService`] trait is
//! the seam that lets the client lifecycle in `qsketch-client` run against
//! an in-memory service in tests.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::TasksClient;
pub use error::{ApiError, ApiResult};
pub use service::TaskService;
pub use types::{
    CreateTaskRequest, CreateTaskResponse, HealthResponse, TaskId, TaskResult, TaskStatus,
    TaskStatusResponse,
};
