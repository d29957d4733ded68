use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

use zonetherm::batch::{self, BatchOptions};
use zonetherm::detection::build_standard_pipeline;
use zonetherm::report;

#[derive(Parser)]
#[command(name = "zonetherm")]
#[command(about = "Classify marked objects into temperature zones and report per-image statistics")]
struct Cli {
    /// Image files or directories of images
    #[arg(value_name = "PATH", default_value = "images")]
    inputs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Also write the results as CSV to this file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Save per-step visualizations to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Maximum number of images analyzed concurrently (default: number of cores)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Analyze every file in a directory, not only known image extensions
    #[arg(long)]
    all_files: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut pipeline = build_standard_pipeline();
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    let mut options = BatchOptions {
        include_all_files: args.all_files,
        ..BatchOptions::default()
    };
    if let Some(jobs) = args.jobs {
        options.jobs = jobs;
    }

    let results = batch::run_batch(Arc::new(pipeline), &args.inputs, &options).await?;

    if args.json {
        println!("{}", report::render_json(&results)?);
    } else {
        print!("{}", report::render_table(&results));
    }

    if let Some(csv_path) = &args.csv {
        report::write_csv(csv_path, &results)?;
        info!(path = %csv_path.display(), "wrote CSV report");
    }

    let failed = results.iter().filter(|r| r.is_failed()).count();
    if failed > 0 {
        warn!(failed, total = results.len(), "some images could not be analyzed");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
