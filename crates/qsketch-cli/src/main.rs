//! qsketch command-line interface.
//!
//! Sketch a 0 or 1, send it to the quantum classification service, and
//! poll for the verdict.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{classify, health, render, status, version, wait};

/// qsketch - classify hand-drawn digits on a quantum backend
#[derive(Parser)]
#[command(name = "qsketch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the classification task service
    #[arg(long, env = "QSKETCH_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a sketch for classification and wait for the result
    Classify {
        /// Sketch image file (PNG)
        #[arg(short, long, conflicts_with = "strokes")]
        input: Option<String>,

        /// Strokes file (JSON) to replay onto a fresh canvas
        #[arg(short, long)]
        strokes: Option<String>,

        /// Compute backend (real, simulator)
        #[arg(short, long, default_value = "simulator")]
        backend: String,

        /// Give up after this many seconds (0 = wait forever)
        #[arg(long, default_value = "0")]
        timeout: u64,
    },

    /// Rasterise a strokes file to a PNG without submitting it
    Render {
        /// Strokes file (JSON)
        #[arg(short, long)]
        strokes: String,

        /// Output PNG file
        #[arg(short, long)]
        output: String,
    },

    /// Query the status of a submitted task
    Status {
        /// Task ID
        task_id: String,
    },

    /// Resume polling an existing task until it completes
    Wait {
        /// Task ID
        task_id: String,

        /// Timeout in seconds
        #[arg(short, long, default_value = "86400")]
        timeout: u64,
    },

    /// Check that the classification service is reachable
    Health,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let api_url = cli.api_url.as_deref();

    // Execute command
    let result = match cli.command {
        Commands::Classify {
            input,
            strokes,
            backend,
            timeout,
        } => {
            classify::execute(
                api_url,
                input.as_deref(),
                strokes.as_deref(),
                &backend,
                timeout,
            )
            .await
        }

        Commands::Render { strokes, output } => render::execute(&strokes, &output),

        Commands::Status { task_id } => status::execute(api_url, &task_id).await,

        Commands::Wait { task_id, timeout } => wait::execute(api_url, &task_id, timeout).await,

        Commands::Health => health::execute(api_url).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
