pub mod config;
mod orchestrator;
mod session;
mod types;

pub use orchestrator::{run_analysis, run_analysis_reported};
pub use session::AnalysisSession;
pub use types::{
    AnalysisOutput, PipelineStage, ProgressReporter, RegionOutcome, RegionResult,
};
