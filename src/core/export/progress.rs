//! Machine-readable progress reporting
//!
//! When enabled, each event is printed on stdout as a single line:
//! `PROGRESS:{"type":"progress","current":3,"total":10,...}`. A driving
//! process can follow an export by scanning stdout for the prefix.

use serde::Serialize;

/// Line prefix for serialized events
pub const PROGRESS_PREFIX: &str = "PROGRESS:";

const PREPARING_LABEL: &str = "preparing";
const COMPLETED_LABEL: &str = "completed";
const FAILED_LABEL: &str = "failed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub current: usize,
    pub total: usize,
    pub folder: String,
    /// Notes written so far in the current folder
    pub successful: usize,
    /// Notes failed so far in the whole run
    pub failed: usize,
    pub percentage: f64,
}

impl ProgressEvent {
    /// Progress within a folder after `current` of `total` notes
    pub fn note(
        current: usize,
        total: usize,
        folder: &str,
        successful: usize,
        failed: usize,
    ) -> Self {
        let percentage = if total == 0 {
            100.0
        } else {
            round2(current as f64 / total as f64 * 100.0)
        };
        Self {
            kind: "progress",
            current,
            total,
            folder: folder.to_string(),
            successful,
            failed,
            percentage,
        }
    }

    /// Run-level milestone before folders are processed (0, 10 and 30 percent)
    pub fn preparing(percent: usize) -> Self {
        Self::milestone(percent, PREPARING_LABEL, 0)
    }

    /// Terminal event for a run that finished
    pub fn completed() -> Self {
        Self::milestone(100, COMPLETED_LABEL, 0)
    }

    /// Terminal event for a run that was aborted
    pub fn failed() -> Self {
        Self::milestone(0, FAILED_LABEL, 1)
    }

    fn milestone(percent: usize, label: &str, failed: usize) -> Self {
        Self {
            kind: "progress",
            current: percent,
            total: 100,
            folder: label.to_string(),
            successful: 0,
            failed,
            percentage: percent as f64,
        }
    }

    /// Serializes the event as a `PROGRESS:` line (without newline)
    pub fn to_line(&self) -> serde_json::Result<String> {
        Ok(format!("{PROGRESS_PREFIX}{}", serde_json::to_string(self)?))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Receives progress events from the export loop
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

/// Prints `PROGRESS:` lines on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl ProgressReporter for StdoutReporter {
    fn report(&self, event: &ProgressEvent) {
        match event.to_line() {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize progress event"),
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _event: &ProgressEvent) {}
}
