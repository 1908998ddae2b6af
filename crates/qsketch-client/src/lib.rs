//! Classification client lifecycle.
//!
//! One submission moves through an explicit state machine:
//!
//! ```text
//!   Idle ──submit──→ Submitting ──(task id)──→ Polling
//!                         │                       │
//!                         │          ┌────────────┤
//!                         │          │            │
//!                         │   status != SUCCESS   ├──→ Displayed ──clear──→ Idle
//!                         │   (poll again in 5s)  │
//!                         │                       │
//!                         └──(transport error)────┴──→ Stuck
//! ```
//!
//! **Invariants:**
//! - At most one submission is in flight; starting a new one cancels the
//!   previous poll task and clears the task id and result first.
//! - A stale poll task can never overwrite state belonging to a newer
//!   submission (generation-guarded writes).
//! - `Stuck` is terminal for its submission: the error is logged once and
//!   the processing indicator stays up with no recovery path. Only a new
//!   submission leaves it.

pub mod client;
pub mod message;
pub mod state;

pub use client::{ClassificationClient, JobRecord, POLL_INTERVAL};
pub use state::{Classification, ClientPhase, ComputeBackend, ParseBackendError};
