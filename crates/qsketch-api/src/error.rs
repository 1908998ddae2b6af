//! Error types for the task service client.

use thiserror::Error;

/// Errors that can occur when talking to the task service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// No API base URL was provided.
    #[error("missing API base URL (set QSKETCH_API_URL or pass --api-url)")]
    MissingBaseUrl,

    /// Network or protocol failure.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Task ID is unknown to the service.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// Service returned a non-success status code.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },
}

/// Result type for task service operations.
pub type ApiResult<T> = Result<T, ApiError>;
