//! Classify command implementation.
//!
//! Submits a sketch and watches the client lifecycle until the result is
//! displayed. If the submission gets stuck (transport failure, no recovery
//! path) the spinner stays up until the timeout.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use console::style;

use qsketch_client::{ClassificationClient, ClientPhase, ComputeBackend};

use super::common::{load_sketch, print_result, tasks_client, waiting_spinner};

/// How often the render loop re-reads the client phase.
const REFRESH_INTERVAL: Duration = Duration::from_millis(200);

/// Execute the classify command.
pub async fn execute(
    api_url: Option<&str>,
    input: Option<&str>,
    strokes: Option<&str>,
    backend: &str,
    timeout: u64,
) -> Result<()> {
    let backend = ComputeBackend::from_str(backend)?;
    let sketch = load_sketch(input, strokes)?;
    let payload = sketch.export_png()?;

    let client = ClassificationClient::new(tasks_client(api_url)?);

    println!(
        "{} Submitting {}x{} sketch to the {} backend",
        style("→").cyan().bold(),
        sketch.width(),
        sketch.height(),
        style(backend).yellow()
    );

    client.submit(backend, payload).await;

    let spinner = waiting_spinner();
    let start = std::time::Instant::now();
    let timeout = (timeout > 0).then(|| Duration::from_secs(timeout));

    loop {
        if let ClientPhase::Displayed { outcome } = client.phase().await {
            spinner.finish_and_clear();
            print_result(&outcome);
            return Ok(());
        }

        if let Some(message) = client.status_message().await {
            spinner.set_message(message);
        }

        if let Some(limit) = timeout {
            if start.elapsed() > limit {
                spinner.finish_and_clear();
                match client.task_id().await {
                    Some(task_id) => anyhow::bail!(
                        "Timeout after {}s. Task {} may still finish; check it with \
                         'qsketch wait {}'.",
                        limit.as_secs(),
                        task_id,
                        task_id
                    ),
                    None => anyhow::bail!(
                        "Timeout after {}s with no task id; the submission never reached \
                         the service.",
                        limit.as_secs()
                    ),
                }
            }
        }

        tokio::time::sleep(REFRESH_INTERVAL).await;
    }
}
