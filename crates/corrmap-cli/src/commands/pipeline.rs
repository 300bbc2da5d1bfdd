use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use corrmap_core::pipeline::config::AnalysisConfig;
use corrmap_core::pipeline::run_analysis_reported;
use tracing::info;

use crate::progress::BarReporter;
use crate::summary::{print_analysis_summary, print_results};

#[derive(Args)]
pub struct RunArgs {
    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: PathBuf,

    /// Override the input from the config file
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Override the output directory from the config file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read config {}", args.config.display()))?;
    let mut config: AnalysisConfig = toml::from_str(&contents).context("Invalid analysis config")?;

    if let Some(ref input) = args.input {
        config.input = input.clone();
    }
    if let Some(ref output) = args.output {
        config.output_dir = output.clone();
    }

    execute(&config)
}

/// Print the plan, run the analysis with a progress bar, print the results.
pub fn execute(config: &AnalysisConfig) -> Result<()> {
    print_analysis_summary(config);
    info!(regions = config.regions.len(), input = %config.input.display(), "Starting analysis");

    let reporter = Arc::new(BarReporter::new());
    let output = run_analysis_reported(config, reporter.clone())
        .with_context(|| format!("Analysis of {} failed", config.input.display()))?;
    reporter.finish();

    print_results(&output);
    println!("Output saved to {}", config.output_dir.display());
    Ok(())
}
