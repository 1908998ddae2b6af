//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    println!(
        "{} {}",
        style("qsketch").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
}
