//! Health command implementation.

use anyhow::Result;
use console::style;

use super::common::tasks_client;

/// Execute the health command.
pub async fn execute(api_url: Option<&str>) -> Result<()> {
    let client = tasks_client(api_url)?;

    let health = client
        .health()
        .await
        .map_err(|e| anyhow::anyhow!("Service unreachable: {e}"))?;

    if health.is_ok() {
        println!(
            "{} Service at {} is up",
            style("✓").green().bold(),
            style(client.base_url()).dim()
        );
        Ok(())
    } else {
        anyhow::bail!("Service reported status '{}'", health.status)
    }
}
