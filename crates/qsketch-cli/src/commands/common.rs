//! Helpers shared across commands.

use anyhow::{Context, Result, anyhow};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use qsketch_api::TasksClient;
use qsketch_canvas::{Sketch, parse_strokes};
use qsketch_client::{Classification, message};

/// Build a task service client, or explain how to configure one.
pub fn tasks_client(api_url: Option<&str>) -> Result<TasksClient> {
    let url = api_url
        .ok_or_else(|| anyhow!("no API base URL; set QSKETCH_API_URL or pass --api-url"))?;
    Ok(TasksClient::new(url)?)
}

/// Load a sketch from a PNG file or a strokes file.
pub fn load_sketch(input: Option<&str>, strokes: Option<&str>) -> Result<Sketch> {
    match (input, strokes) {
        (Some(path), _) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("failed to read '{path}'"))?;
            debug!("Loaded sketch image from {path} ({} bytes)", bytes.len());
            Ok(Sketch::from_png_bytes(&bytes)?)
        }
        (None, Some(path)) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("failed to read '{path}'"))?;
            let paths = parse_strokes(&bytes)?;
            debug!("Replaying {} strokes from {path}", paths.len());
            let mut sketch = Sketch::default();
            sketch.apply_all(&paths);
            Ok(sketch)
        }
        (None, None) => anyhow::bail!("provide a sketch with --input <png> or --strokes <json>"),
    }
}

/// Spinner shown while a task is processing.
pub fn waiting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message::JOB_STARTING.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Print the classification verdict.
pub fn print_result(outcome: &Classification) {
    println!(
        "{} {}",
        style("✓").green().bold(),
        message::result_line(outcome)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_tasks_client_requires_base_url() {
        let err = tasks_client(None).unwrap_err();
        assert!(err.to_string().contains("QSKETCH_API_URL"));
    }

    #[test]
    fn test_load_sketch_requires_an_input() {
        assert!(load_sketch(None, None).is_err());
    }

    #[test]
    fn test_load_sketch_from_strokes_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"paths": [{"x": 100.0, "y": 100.0}, {"x": 180.0, "y": 180.0}]}]"#,
        )
        .unwrap();

        let sketch = load_sketch(None, Some(file.path().to_str().unwrap())).unwrap();
        assert!(!sketch.is_blank());
    }

    #[test]
    fn test_load_sketch_from_png_file() {
        let mut drawn = Sketch::default();
        drawn.draw_stroke(&[qsketch_canvas::Point::new(140.0, 140.0)]);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&drawn.to_png_bytes().unwrap()).unwrap();

        let loaded = load_sketch(Some(file.path().to_str().unwrap()), None).unwrap();
        assert_eq!(loaded.width(), drawn.width());
        assert!(!loaded.is_blank());
    }
}
