//! User-facing message strings.
//!
//! The Japanese strings shown to the user. Tests pin them byte-for-byte
//! because the displayed result text is part of the observable contract.

use crate::state::Classification;

/// Prompt shown when nothing has been classified yet.
pub const IDLE_PROMPT: &str = "枠内に 0 か 1 を描いて、量子コンピューターで識別してみましょう。";

/// Spinner caption before the service has assigned a task id.
pub const JOB_STARTING: &str = "ジョブを開始中です...";

/// Spinner caption while a known task is being processed.
pub fn job_running(task_id: &str) -> String {
    format!("ジョブ ID: {task_id} を処理しています...")
}

/// Result line for a completed classification.
pub fn result_line(outcome: &Classification) -> String {
    format!(
        "識別結果は {} でした！使用したバックエンドは {} です。",
        outcome.label, outcome.backend
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_line_exact() {
        let outcome = Classification {
            label: "1".into(),
            backend: "real".into(),
        };
        assert_eq!(
            result_line(&outcome),
            "識別結果は 1 でした！使用したバックエンドは real です。"
        );
    }

    #[test]
    fn test_job_running_mentions_task_id() {
        assert_eq!(
            job_running("abc123"),
            "ジョブ ID: abc123 を処理しています..."
        );
    }
}
