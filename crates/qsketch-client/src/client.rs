//! The classification client.
//!
//! Owns the submit/poll lifecycle for one classification at a time. The
//! poll loop runs as a spawned task tied to its submission: starting a new
//! submission aborts the previous task, and every state write is guarded by
//! a generation counter so a stale loop that races the abort still cannot
//! clobber newer state.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use qsketch_api::{CreateTaskRequest, TaskId, TaskService};

use crate::message;
use crate::state::{Classification, ClientPhase, ComputeBackend};

/// How long to wait between task status polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Metadata for the most recent submission.
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// Task id, once the service assigned one.
    pub task_id: Option<TaskId>,
    /// Compute target the user selected.
    pub backend: ComputeBackend,
    /// When the submission was started.
    pub created_at: DateTime<Utc>,
    /// When the result arrived.
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    fn new(backend: ComputeBackend) -> Self {
        Self {
            task_id: None,
            backend,
            created_at: Utc::now(),
            finished_at: None,
        }
    }
}

/// Mutable client state, shared with the poll task.
struct Inner {
    phase: ClientPhase,
    /// Bumped on every submit; writes from older submissions are dropped.
    generation: u64,
    poll_task: Option<JoinHandle<()>>,
    record: Option<JobRecord>,
}

/// Client for the classification service.
///
/// Cheap to clone; clones share lifecycle state, so a render loop can watch
/// [`phase`](ClassificationClient::phase) while a submission runs elsewhere.
pub struct ClassificationClient<S> {
    service: Arc<S>,
    poll_interval: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl<S> Clone for ClassificationClient<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            poll_interval: self.poll_interval,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> std::fmt::Debug for ClassificationClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationClient")
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl<S: TaskService + 'static> ClassificationClient<S> {
    /// Create a client over the given task service.
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
            poll_interval: POLL_INTERVAL,
            inner: Arc::new(Mutex::new(Inner {
                phase: ClientPhase::Idle,
                generation: 0,
                poll_task: None,
                record: None,
            })),
        }
    }

    /// Override the fixed poll interval (mainly for tests).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Submit a sketch for classification.
    ///
    /// Cancels any outstanding poll from a previous submission and clears
    /// the task id and result *before* issuing the create request. On a
    /// transport failure the error is logged once and the client goes
    /// [`Stuck`](ClientPhase::Stuck); there is no retry.
    pub async fn submit(&self, backend: ComputeBackend, img: String) {
        let generation = {
            let mut inner = self.inner.lock().await;
            if let Some(task) = inner.poll_task.take() {
                debug!("Cancelling poll task of a superseded submission");
                task.abort();
            }
            inner.generation += 1;
            inner.phase = ClientPhase::Submitting;
            inner.record = Some(JobRecord::new(backend));
            inner.generation
        };

        let request = CreateTaskRequest {
            img,
            backend: backend.to_string(),
        };

        match self.service.create_task(&request).await {
            Ok(response) => {
                let task_id = response.task_id;
                let mut inner = self.inner.lock().await;
                if inner.generation != generation {
                    debug!("Submission of task {task_id} superseded before polling started");
                    return;
                }
                info!("Task submitted: {task_id} (backend: {backend})");
                inner.phase = ClientPhase::Polling {
                    task_id: task_id.clone(),
                };
                if let Some(record) = inner.record.as_mut() {
                    record.task_id = Some(task_id.clone());
                }
                inner.poll_task = Some(tokio::spawn(Self::run_poll_loop(
                    Arc::clone(&self.service),
                    Arc::clone(&self.inner),
                    self.poll_interval,
                    task_id,
                    generation,
                )));
            }
            Err(e) => {
                error!("Task submission failed: {e}");
                let mut inner = self.inner.lock().await;
                if inner.generation == generation {
                    inner.phase = ClientPhase::Stuck { task_id: None };
                }
            }
        }
    }

    /// Poll one task until `SUCCESS`, then publish the outcome.
    ///
    /// The first check happens immediately; afterwards one request per
    /// interval, indefinitely, with no backoff or retry ceiling. Any status
    /// other than `SUCCESS` (including `FAILURE`) keeps the loop alive; a
    /// transport error ends it in `Stuck`.
    async fn run_poll_loop(
        service: Arc<S>,
        inner: Arc<Mutex<Inner>>,
        poll_interval: Duration,
        task_id: TaskId,
        generation: u64,
    ) {
        loop {
            match service.task_status(&task_id).await {
                Ok(response) if response.task_status.is_success() => {
                    let outcome = match response.task_result {
                        Some(result) => Classification::from(result),
                        None => {
                            warn!("Task {task_id} reported SUCCESS without a result");
                            Classification::default()
                        }
                    };

                    let mut inner = inner.lock().await;
                    if inner.generation != generation {
                        debug!("Dropping stale result for task {task_id}");
                        return;
                    }
                    info!("Task {task_id} completed: label {}", outcome.label);
                    inner.phase = ClientPhase::Displayed { outcome };
                    if let Some(record) = inner.record.as_mut() {
                        record.finished_at = Some(Utc::now());
                    }
                    inner.poll_task = None;
                    return;
                }
                Ok(response) => {
                    debug!(
                        "Task {task_id} status: {}, next poll in {}s",
                        response.task_status,
                        poll_interval.as_secs()
                    );
                }
                Err(e) => {
                    error!("Status poll for task {task_id} failed: {e}");
                    let mut inner = inner.lock().await;
                    if inner.generation == generation {
                        inner.phase = ClientPhase::Stuck {
                            task_id: Some(task_id.clone()),
                        };
                        inner.poll_task = None;
                    }
                    return;
                }
            }

            sleep(poll_interval).await;
        }
    }

    /// Clear the displayed result.
    ///
    /// Only leaves [`Displayed`](ClientPhase::Displayed); an in-flight poll
    /// keeps running and will still publish its result.
    pub async fn clear_result(&self) {
        let mut inner = self.inner.lock().await;
        if matches!(inner.phase, ClientPhase::Displayed { .. }) {
            inner.phase = ClientPhase::Idle;
        }
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> ClientPhase {
        self.inner.lock().await.phase.clone()
    }

    /// Whether the waiting indicator should be visible.
    pub async fn is_processing(&self) -> bool {
        self.inner.lock().await.phase.is_processing()
    }

    /// Task id of the current submission, if assigned.
    pub async fn task_id(&self) -> Option<TaskId> {
        self.inner.lock().await.phase.task_id().cloned()
    }

    /// The displayed outcome, if any.
    pub async fn classification(&self) -> Option<Classification> {
        self.inner.lock().await.phase.classification().cloned()
    }

    /// Metadata for the most recent submission.
    pub async fn last_job(&self) -> Option<JobRecord> {
        self.inner.lock().await.record.clone()
    }

    /// Spinner caption for the current phase, or `None` when not processing.
    pub async fn status_message(&self) -> Option<String> {
        let inner = self.inner.lock().await;
        match &inner.phase {
            ClientPhase::Submitting => Some(message::JOB_STARTING.to_string()),
            ClientPhase::Polling { task_id } => Some(message::job_running(task_id.as_str())),
            ClientPhase::Stuck { task_id } => Some(match task_id {
                Some(id) => message::job_running(id.as_str()),
                None => message::JOB_STARTING.to_string(),
            }),
            _ => None,
        }
    }

    /// Text for the result area: the outcome line, or the idle prompt.
    pub async fn result_text(&self) -> String {
        let inner = self.inner.lock().await;
        match inner.phase.classification() {
            Some(outcome) => message::result_line(outcome),
            None => message::IDLE_PROMPT.to_string(),
        }
    }
}
