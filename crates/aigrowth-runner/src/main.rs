//! Experiment runner binary
//!
//! Usage: `aigrowth-runner [--output-dir DIR] [--tag LABEL] [--parallel] [--fail-fast]`

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aigrowth_runner::{run_id, ExperimentRunner, RunnerConfig, RUNNER_VERSION};

#[derive(Parser, Debug)]
#[command(name = "aigrowth-runner")]
#[command(about = "Run the AI growth/risk comparative-statics experiments and write CSV datasets")]
struct Args {
    /// Directory where run directories are created (default: out/simulations)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Label appended to the run identifier
    #[arg(long)]
    tag: Option<String>,

    /// Evaluate sweep points in parallel
    #[arg(long)]
    parallel: bool,

    /// Abort an experiment at its first failing point
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    info!("Starting AI growth runner v{}", RUNNER_VERSION);

    let mut config = RunnerConfig::load()?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.parallel |= args.parallel;
    config.fail_fast |= args.fail_fast;
    info!(
        "Loaded configuration: output_dir={}, parallel={}, fail_fast={}",
        config.output_dir.display(),
        config.parallel,
        config.fail_fast
    );

    let output_dir = config.output_dir.clone();
    let runner = ExperimentRunner::new(config, run_id(args.tag.as_deref()));
    let artifacts = runner.run_all()?;

    info!("Generated datasets:");
    for artifact in &artifacts {
        let path = artifact
            .csv_path
            .strip_prefix(&output_dir)
            .unwrap_or(&artifact.csv_path);
        info!("  - {} ({} rows, {} failed)", path.display(), artifact.rows, artifact.failures);
    }
    Ok(())
}
