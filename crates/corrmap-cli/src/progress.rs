use std::time::Duration;

use corrmap_core::pipeline::{PipelineStage, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal progress reporter: a bar for counted stages, a spinner otherwise.
pub struct BarReporter {
    pb: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Self {
        Self {
            pb: ProgressBar::new_spinner(),
        }
    }

    pub fn finish(&self) {
        self.pb.finish_with_message("Done");
    }
}

impl Default for BarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.pb.reset();
        match total_items {
            Some(total) => {
                if let Ok(style) = ProgressStyle::default_bar().template("{msg:18} [{bar:40}] {pos}/{len}") {
                    self.pb.set_style(style.progress_chars("=> "));
                }
                self.pb.set_length(total as u64);
            }
            None => {
                if let Ok(style) = ProgressStyle::default_spinner().template("{msg:18} {spinner}") {
                    self.pb.set_style(style);
                }
                self.pb.enable_steady_tick(Duration::from_millis(100));
            }
        }
        self.pb.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        self.pb.disable_steady_tick();
        self.pb.println(format!("  {} done", self.pb.message()));
    }
}
