//! Wait command implementation.
//!
//! Poll an existing task until it reports `SUCCESS`, then print the result.

use anyhow::Result;
use console::style;

use qsketch_api::{TaskId, TasksClient};
use qsketch_client::{Classification, POLL_INTERVAL, message};

use super::common::{print_result, tasks_client, waiting_spinner};

/// Execute the wait command.
pub async fn execute(api_url: Option<&str>, task_id: &str, timeout: u64) -> Result<()> {
    let client: TasksClient = tasks_client(api_url)?;
    let task_id = TaskId::new(task_id);

    println!(
        "{} Waiting for task {} (timeout: {}s)",
        style("→").cyan().bold(),
        style(&task_id).dim(),
        timeout
    );

    let spinner = waiting_spinner();
    spinner.set_message(message::job_running(task_id.as_str()));

    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_secs(timeout);

    loop {
        let response = client
            .task_status(&task_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get status: {e}"))?;

        if response.task_status.is_success() {
            spinner.finish_and_clear();
            let outcome = response
                .task_result
                .map(Classification::from)
                .unwrap_or_default();
            print_result(&outcome);
            return Ok(());
        }

        spinner.set_message(format!(
            "{} (status: {})",
            message::job_running(task_id.as_str()),
            response.task_status
        ));

        if start.elapsed() > timeout {
            spinner.finish_and_clear();
            anyhow::bail!(
                "Timeout after {}s. Task {} is still {}. Use 'qsketch status {}' to check later.",
                timeout.as_secs(),
                task_id,
                response.task_status,
                task_id
            );
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
