//! Client-side lifecycle types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use qsketch_api::{TaskId, TaskResult};

/// Compute target selected by the user, passed through to the service
/// opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeBackend {
    /// A real quantum device.
    Real,
    /// A simulator.
    Simulator,
}

impl ComputeBackend {
    /// The wire name of this backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputeBackend::Real => "real",
            ComputeBackend::Simulator => "simulator",
        }
    }
}

impl std::fmt::Display for ComputeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error parsing a backend name.
#[derive(Debug, Error)]
#[error("unknown backend '{0}' (expected \"real\" or \"simulator\")")]
pub struct ParseBackendError(String);

impl std::str::FromStr for ComputeBackend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real" => Ok(ComputeBackend::Real),
            "simulator" => Ok(ComputeBackend::Simulator),
            other => Err(ParseBackendError(other.to_string())),
        }
    }
}

/// Final outcome of a classification task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted label, exactly as the service reported it.
    pub label: String,
    /// Name of the compute backend that ran the task.
    pub backend: String,
}

impl From<TaskResult> for Classification {
    fn from(result: TaskResult) -> Self {
        Self {
            label: result.result,
            backend: result.backend,
        }
    }
}

/// Where the current submission is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientPhase {
    /// No submission in flight and nothing displayed.
    Idle,
    /// Create request issued, task id not yet assigned.
    Submitting,
    /// Task enqueued; polling for completion.
    Polling {
        /// The task being polled.
        task_id: TaskId,
    },
    /// Result received and shown.
    Displayed {
        /// The classification outcome.
        outcome: Classification,
    },
    /// A transport error ended the submission; no recovery path short of a
    /// new submission. The processing indicator deliberately stays up.
    Stuck {
        /// The task id, when the submission got far enough to have one.
        task_id: Option<TaskId>,
    },
}

impl ClientPhase {
    /// Whether the waiting indicator should be visible.
    ///
    /// `Stuck` counts as processing: the spinner stays up after a failed
    /// submission, with no recovery short of a new one.
    pub fn is_processing(&self) -> bool {
        matches!(
            self,
            ClientPhase::Submitting | ClientPhase::Polling { .. } | ClientPhase::Stuck { .. }
        )
    }

    /// The task id of the current submission, if one has been assigned.
    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            ClientPhase::Polling { task_id } => Some(task_id),
            ClientPhase::Stuck { task_id } => task_id.as_ref(),
            _ => None,
        }
    }

    /// The displayed outcome, if any.
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            ClientPhase::Displayed { outcome } => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_backend_wire_names() {
        assert_eq!(ComputeBackend::Real.to_string(), "real");
        assert_eq!(ComputeBackend::Simulator.to_string(), "simulator");
        assert_eq!(
            ComputeBackend::from_str("real").unwrap(),
            ComputeBackend::Real
        );
        assert_eq!(
            ComputeBackend::from_str("simulator").unwrap(),
            ComputeBackend::Simulator
        );
        assert!(ComputeBackend::from_str("quantum").is_err());
    }

    #[test]
    fn test_processing_phases() {
        assert!(!ClientPhase::Idle.is_processing());
        assert!(ClientPhase::Submitting.is_processing());
        assert!(
            ClientPhase::Polling {
                task_id: TaskId::new("abc123")
            }
            .is_processing()
        );
        assert!(
            !ClientPhase::Displayed {
                outcome: Classification::default()
            }
            .is_processing()
        );
        // Stuck keeps the spinner up.
        assert!(ClientPhase::Stuck { task_id: None }.is_processing());
    }

    #[test]
    fn test_task_id_only_while_polling() {
        assert!(ClientPhase::Submitting.task_id().is_none());
        let polling = ClientPhase::Polling {
            task_id: TaskId::new("abc123"),
        };
        assert_eq!(polling.task_id().unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_classification_from_task_result() {
        let result: TaskResult = serde_json::from_str(
            r#"{"result": "1", "backend": "ibmq_lima"}"#,
        )
        .unwrap();
        let outcome = Classification::from(result);
        assert_eq!(outcome.label, "1");
        assert_eq!(outcome.backend, "ibmq_lima");
    }
}
