use std::path::PathBuf;

use crate::correlation::Seed;
use crate::frame::SourceInfo;
use crate::roi::Roi;
use crate::trace::TimeTrace;

/// Analysis stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Reading,
    Smoothing,
    GlobalTrace,
    Residuals,
    Correlation,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading frames"),
            Self::Smoothing => write!(f, "Smoothing"),
            Self::GlobalTrace => write!(f, "Global trace"),
            Self::Residuals => write!(f, "Residual volume"),
            Self::Correlation => write!(f, "Correlating"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Outcome of one region query.
#[derive(Clone, Debug)]
pub enum RegionOutcome {
    Mapped {
        seed: Seed,
        /// Largest defined coefficient and where it sits.
        peak: Option<(Seed, f32)>,
        undefined: usize,
        /// Raw coefficients, 32-bit float TIFF.
        path: PathBuf,
        preview: Option<PathBuf>,
    },
    /// The query failed; the residual volume stays valid for other regions.
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct RegionResult {
    pub roi: Roi,
    pub outcome: RegionOutcome,
}

/// Everything a run produced, minus the maps themselves (those go to disk).
#[derive(Clone, Debug)]
pub struct AnalysisOutput {
    pub source: SourceInfo,
    pub global_trace: TimeTrace,
    pub regions: Vec<RegionResult>,
    /// Multi-page float TIFF of the residual volume, when exported.
    pub residual_stack: Option<PathBuf>,
    pub residual_previews: Vec<PathBuf>,
}

/// Thread-safe progress reporting for the analysis.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage (e.g. region count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_analysis` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
