//! Status command implementation.

use anyhow::Result;
use console::style;

use qsketch_api::TaskId;
use qsketch_client::Classification;

use super::common::{print_result, tasks_client};

/// Execute the status command.
pub async fn execute(api_url: Option<&str>, task_id: &str) -> Result<()> {
    let client = tasks_client(api_url)?;
    let task_id = TaskId::new(task_id);

    let response = client
        .task_status(&task_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get status: {e}"))?;

    println!(
        "Task {}: {}",
        style(&task_id).dim(),
        style(&response.task_status).bold()
    );

    if response.task_status.is_success() {
        let outcome = response
            .task_result
            .map(Classification::from)
            .unwrap_or_default();
        print_result(&outcome);
    }

    Ok(())
}
