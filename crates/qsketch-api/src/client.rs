//! HTTP client for the classification task service.
//!
//! ## Submission flow
//!
//! 1. Export the sketch as a base64 PNG data URL
//! 2. `POST /tasks` with `{ img, backend }` → get `task_id`
//! 3. Poll `GET /tasks/{task_id}` until `task_status == "SUCCESS"`
//! 4. Read the label and used backend from `task_result`

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{ApiError, ApiResult};
use crate::types::{
    CreateTaskRequest, CreateTaskResponse, HealthResponse, TaskId, TaskStatusResponse,
};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "QSKETCH_API_URL";

/// User agent string for task submissions.
const USER_AGENT: &str = concat!("qsketch-api/", env!("CARGO_PKG_VERSION"));

/// Task service API client.
#[derive(Clone)]
pub struct TasksClient {
    /// HTTP client.
    client: Client,
    /// API base URL, without trailing slash.
    base_url: String,
}

impl std::fmt::Debug for TasksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TasksClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TasksClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(ApiError::MissingBaseUrl);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self { client, base_url })
    }

    /// Create a client from the `QSKETCH_API_URL` environment variable.
    pub fn from_env() -> ApiResult<Self> {
        let base_url = std::env::var(API_URL_ENV).map_err(|_| ApiError::MissingBaseUrl)?;
        Self::new(base_url)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Enqueue a classification task.
    #[instrument(skip(self, request))]
    pub async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<CreateTaskResponse> {
        let url = self.url("/tasks");
        debug!(backend = %request.backend, "Creating task at {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        self.handle_response(response).await
    }

    /// Get the status (and, once complete, the result) of a task.
    #[instrument(skip(self))]
    pub async fn task_status(&self, task_id: &TaskId) -> ApiResult<TaskStatusResponse> {
        let url = self.url(&format!("/tasks/{task_id}"));
        debug!("Getting task status from {}", url);

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Check service liveness via `GET /`.
    #[instrument(skip(self))]
    pub async fn health(&self) -> ApiResult<HealthResponse> {
        let url = self.url("/");
        debug!("Checking service health at {}", url);

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Handle HTTP response, extracting JSON or returning an error.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.json().await?;
            Ok(body)
        } else {
            let message = response.text().await.unwrap_or_default();

            match status {
                StatusCode::NOT_FOUND => Err(ApiError::TaskNotFound(message)),
                _ => Err(ApiError::Api {
                    status: status.as_u16(),
                    message,
                }),
            }
        }
    }
}
