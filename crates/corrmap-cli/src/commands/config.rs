use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use corrmap_core::pipeline::config::AnalysisConfig;
use corrmap_core::roi::Roi;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a full default AnalysisConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = AnalysisConfig {
        regions: vec![
            Roi::Point { x: 64, y: 48 },
            Roi::Rect {
                x: 10,
                y: 10,
                width: 8,
                height: 8,
            },
        ],
        ..Default::default()
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
