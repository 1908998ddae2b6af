//! Wire types for the task service.
//!
//! Field names follow the service contract exactly (`img`, `task_id`,
//! `task_status`, `task_result`); do not rename without a service-side
//! migration.

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque task identifier assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create a new task ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Request body for `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Encoded sketch image as a base64 data URL
    /// (`data:image/png;base64,…`). The worker strips everything up to the
    /// first comma before decoding.
    pub img: String,
    /// Compute target, `"real"` or `"simulator"`, passed through opaquely.
    pub backend: String,
}

/// Response body for `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    /// Identifier of the enqueued task.
    pub task_id: TaskId,
}

/// Status of a task as reported by the service.
///
/// `"SUCCESS"` (case-exact) is the only terminal-success value. Every other
/// string (`PENDING`, `STARTED`, `RETRY`, even `FAILURE`) means the task
/// is not done from the client's perspective and polling continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    /// Task completed and `task_result` is available.
    Success,
    /// Any non-terminal status, carrying the raw status string.
    Pending(String),
}

impl TaskStatus {
    /// Check whether the task has completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Success)
    }

    /// The raw status string as reported by the service.
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Success => "SUCCESS",
            TaskStatus::Pending(s) => s,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        if s == "SUCCESS" {
            TaskStatus::Success
        } else {
            TaskStatus::Pending(s)
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification outcome attached to a successful task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Predicted label. The worker emits it as a JSON number, so accept
    /// both number and string and normalise to text.
    #[serde(deserialize_with = "label_as_string")]
    pub result: String,
    /// Name of the compute backend that actually ran the task
    /// (e.g. `"simulator_statevector"` or a device name).
    pub backend: String,
}

/// Response body for `GET /tasks/{task_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    /// Echoed task identifier.
    #[serde(default)]
    pub task_id: Option<TaskId>,
    /// Current task status.
    pub task_status: TaskStatus,
    /// Present (non-null) only when `task_status` is `SUCCESS`.
    #[serde(default)]
    pub task_result: Option<TaskResult>,
}

/// Response body for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when the service is up.
    pub status: String,
}

impl HealthResponse {
    /// Check whether the service reported itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Deserialize a label that may arrive as a JSON string or number.
fn label_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number label, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_serialization() {
        let request = CreateTaskRequest {
            img: "data:image/png;base64,iVBORw0KGgo=".into(),
            backend: "real".into(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["img"], "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(json["backend"], "real");
    }

    #[test]
    fn test_create_task_response_deserialization() {
        let response: CreateTaskResponse =
            serde_json::from_str(r#"{"task_id": "abc123"}"#).unwrap();
        assert_eq!(response.task_id, TaskId::new("abc123"));
    }

    #[test]
    fn test_task_status_success_is_case_exact() {
        assert!(TaskStatus::from("SUCCESS".to_string()).is_success());
        assert!(!TaskStatus::from("success".to_string()).is_success());
        assert!(!TaskStatus::from("PENDING".to_string()).is_success());
        // FAILURE is not terminal for the client; it keeps polling.
        assert!(!TaskStatus::from("FAILURE".to_string()).is_success());
    }

    #[test]
    fn test_task_status_roundtrip() {
        let status: TaskStatus = serde_json::from_str(r#""STARTED""#).unwrap();
        assert_eq!(status, TaskStatus::Pending("STARTED".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""STARTED""#);
    }

    #[test]
    fn test_status_response_pending_with_null_result() {
        let response: TaskStatusResponse = serde_json::from_str(
            r#"{"task_id": "abc123", "task_status": "PENDING", "task_result": null}"#,
        )
        .unwrap();
        assert!(!response.task_status.is_success());
        assert!(response.task_result.is_none());
    }

    #[test]
    fn test_status_response_success_with_string_label() {
        let response: TaskStatusResponse = serde_json::from_str(
            r#"{"task_status": "SUCCESS", "task_result": {"result": "1", "backend": "real"}}"#,
        )
        .unwrap();
        let result = response.task_result.unwrap();
        assert_eq!(result.result, "1");
        assert_eq!(result.backend, "real");
    }

    #[test]
    fn test_status_response_success_with_numeric_label() {
        // The worker emits the label as a bare JSON number.
        let response: TaskStatusResponse = serde_json::from_str(
            r#"{"task_status": "SUCCESS", "task_result": {"result": 0, "backend": "simulator_statevector"}}"#,
        )
        .unwrap();
        let result = response.task_result.unwrap();
        assert_eq!(result.result, "0");
        assert_eq!(result.backend, "simulator_statevector");
    }

    #[test]
    fn test_health_response() {
        let health: HealthResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(health.is_ok());

        let sick: HealthResponse = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert!(!sick.is_ok());
    }
}
