use tracing::info;

use crate::correlation::{correlation_map, CorrelationMap, Seed};
use crate::error::Result;
use crate::residual::residual_volume;
use crate::roi::Roi;
use crate::trace::{global_trace, TimeTrace};
use crate::volume::Volume;

use super::types::{NoOpReporter, PipelineStage, ProgressReporter};

/// Residual volume of one (already smoothed) stack, ready for any number of
/// correlation queries.
///
/// The volume is built once in [`AnalysisSession::new`] and never changes.
#[derive(Clone, Debug)]
pub struct AnalysisSession {
    global: TimeTrace,
    residuals: Volume,
}

impl AnalysisSession {
    pub fn new(stack: &Volume) -> Result<Self> {
        Self::with_reporter(stack, &NoOpReporter)
    }

    pub fn with_reporter(stack: &Volume, reporter: &dyn ProgressReporter) -> Result<Self> {
        reporter.begin_stage(PipelineStage::GlobalTrace, None);
        let global = global_trace(stack)?;
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::Residuals, None);
        let residuals = residual_volume(stack, &global)?;
        reporter.finish_stage();

        info!(
            width = residuals.width(),
            height = residuals.height(),
            frames = residuals.frame_count(),
            "Analysis session ready"
        );
        Ok(Self { global, residuals })
    }

    pub fn global_trace(&self) -> &TimeTrace {
        &self.global
    }

    pub fn residuals(&self) -> &Volume {
        &self.residuals
    }

    pub fn width(&self) -> usize {
        self.residuals.width()
    }

    pub fn height(&self) -> usize {
        self.residuals.height()
    }

    pub fn correlate(&self, seed: Seed) -> Result<CorrelationMap> {
        correlation_map(&self.residuals, seed)
    }

    /// Seed at the truncated centroid of `roi`, then correlate.
    pub fn correlate_roi(&self, roi: &Roi) -> Result<CorrelationMap> {
        let seed = roi.seed(self.width(), self.height())?;
        self.correlate(seed)
    }
}
