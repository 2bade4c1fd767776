use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Progress at the start of the stage range.
const STAGES_START: u8 = 25;
/// Progress once every stage has finished.
const STAGES_END: u8 = 90;

/// One snapshot written to the progress file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Percent complete, 0..=100
    pub progress: u8,
    pub message: String,
    /// Seconds since the Unix epoch
    pub timestamp: f64,
}

/// Rewrites a JSON progress file at each milestone.
///
/// Reporting is best effort: write failures are logged and otherwise
/// ignored, so a bad progress path never fails a render.
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    path: Option<PathBuf>,
}

impl ProgressReporter {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Reporter that writes nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn report(&self, progress: u8, message: &str) {
        let Some(path) = &self.path else {
            return;
        };
        let update = ProgressUpdate {
            progress: progress.min(100),
            message: message.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
        };
        let result = serde_json::to_vec(&update)
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(path, json));
        match result {
            Ok(()) => tracing::debug!(progress, text = message, "Progress reported"),
            Err(e) => tracing::warn!(path = %path.display(), %e, "Failed to write progress file"),
        }
    }

    /// Report completion of stage `index` out of `total`.
    pub fn report_stage(&self, index: usize, total: usize, stage: &str) {
        self.report(stage_progress(index, total), &format!("{stage} complete"));
    }
}

/// Progress after stage `index` (zero-based) of `total`, spread evenly over
/// the stage range.
pub fn stage_progress(index: usize, total: usize) -> u8 {
    let span = (STAGES_END - STAGES_START) as usize;
    let done = (index + 1).min(total.max(1));
    STAGES_START + (span * done / total.max(1)) as u8
}
