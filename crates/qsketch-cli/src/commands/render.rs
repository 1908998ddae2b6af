//! Render command implementation.
//!
//! Replays a strokes file onto a fresh canvas and writes the PNG, without
//! touching the network.

use anyhow::{Context, Result};
use console::style;

use qsketch_canvas::{Sketch, parse_strokes};

/// Execute the render command.
pub fn execute(strokes: &str, output: &str) -> Result<()> {
    let bytes =
        std::fs::read(strokes).with_context(|| format!("failed to read '{strokes}'"))?;
    let paths = parse_strokes(&bytes)?;

    let mut sketch = Sketch::default();
    sketch.apply_all(&paths);

    if sketch.is_blank() {
        println!(
            "{} Strokes file produced a blank canvas",
            style("!").yellow().bold()
        );
    }

    std::fs::write(output, sketch.to_png_bytes()?)
        .with_context(|| format!("failed to write '{output}'"))?;

    println!(
        "{} Rendered {} strokes to {}",
        style("✓").green().bold(),
        paths.len(),
        style(output).green()
    );

    Ok(())
}
