use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::filters::mean_filter::mean_filter_volume;
use crate::io::export::{
    save_correlation_map, save_correlation_preview, save_residual_previews, save_residual_stack,
};
use crate::io::load_stack;

use super::config::AnalysisConfig;
use super::session::AnalysisSession;
use super::types::{
    AnalysisOutput, NoOpReporter, PipelineStage, ProgressReporter, RegionOutcome, RegionResult,
};

/// Run a full analysis with a thread-safe progress reporter.
///
/// Reading, smoothing and residual construction are fatal on error. Each
/// region is an independent query: a failing one is recorded in the output
/// and the remaining regions still run.
pub fn run_analysis_reported(
    config: &AnalysisConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<AnalysisOutput> {
    reporter.begin_stage(PipelineStage::Reading, None);
    let (stack, source) = load_stack(&config.input)?;
    reporter.finish_stage();
    info!(
        width = stack.width(),
        height = stack.height(),
        frames = stack.frame_count(),
        "Stack loaded"
    );

    let stack = match &config.smoothing {
        Some(smoothing) if smoothing.radius > 0.0 => {
            reporter.begin_stage(PipelineStage::Smoothing, None);
            let smoothed = mean_filter_volume(&stack, smoothing.radius)?;
            reporter.finish_stage();
            smoothed
        }
        _ => stack,
    };

    let session = AnalysisSession::with_reporter(&stack, reporter.as_ref())?;
    drop(stack);

    std::fs::create_dir_all(&config.output_dir)?;
    let preview_ext = config.export.preview.map(|format| format.extension());

    reporter.begin_stage(PipelineStage::Correlation, Some(config.regions.len()));
    let mut regions = Vec::with_capacity(config.regions.len());
    for (i, roi) in config.regions.iter().enumerate() {
        let outcome = match session.correlate_roi(roi) {
            Ok(map) => {
                let stem = format!("correlation_{:03}_x{}_y{}", i, map.seed.x, map.seed.y);
                let path = config.output_dir.join(format!("{stem}.tiff"));
                save_correlation_map(&map, &path)?;
                let preview = match preview_ext {
                    Some(ext) => {
                        let preview_path = config.output_dir.join(format!("{stem}_preview.{ext}"));
                        save_correlation_preview(&map, &preview_path)?;
                        Some(preview_path)
                    }
                    None => None,
                };
                RegionOutcome::Mapped {
                    seed: map.seed,
                    peak: map.peak(),
                    undefined: map.undefined_count(),
                    path,
                    preview,
                }
            }
            Err(e) => {
                warn!(region = %roi, error = %e, "Correlation query failed");
                RegionOutcome::Failed(e.to_string())
            }
        };
        regions.push(RegionResult {
            roi: roi.clone(),
            outcome,
        });
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    let mut residual_stack = None;
    let mut residual_previews: Vec<PathBuf> = Vec::new();
    if config.export.residuals {
        reporter.begin_stage(PipelineStage::Writing, None);
        let path = config.output_dir.join("residuals.tiff");
        save_residual_stack(session.residuals(), &path)?;
        residual_stack = Some(path);
        if let Some(ext) = preview_ext {
            residual_previews = save_residual_previews(
                session.residuals(),
                &config.output_dir.join("residuals"),
                ext,
            )?;
        }
        reporter.finish_stage();
    }

    Ok(AnalysisOutput {
        source,
        global_trace: session.global_trace().clone(),
        regions,
        residual_stack,
        residual_previews,
    })
}

/// Run a full analysis without progress reporting.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisOutput> {
    run_analysis_reported(config, Arc::new(NoOpReporter))
}
