//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use super::chunk::ChunkFile;
use crate::core::verification::VerificationReport;
use crate::domain::MinoteError;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Notes returned by the listing
    pub total_notes: usize,

    /// Notes the export tried to process
    pub attempted: usize,

    /// Notes written to an output file
    pub succeeded: usize,

    /// Notes that could not be exported
    pub failed: usize,

    /// Notes dropped because their folder was never announced
    pub skipped_unknown_folder: usize,

    /// Images embedded as resources
    pub resources_embedded: usize,

    /// Images left as placeholder text
    pub resources_failed: usize,

    /// Written documents, in write order
    pub files: Vec<ChunkFile>,

    /// Absolute path of the output directory
    pub output_dir: PathBuf,

    /// Duration of the export
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,

    /// Verification report (if verification was run)
    pub verification_report: Option<VerificationReport>,

    /// Whether the export was stopped by a shutdown signal
    pub interrupted: bool,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            total_notes: 0,
            attempted: 0,
            succeeded: 0,
            failed: 0,
            skipped_unknown_folder: 0,
            resources_embedded: 0,
            resources_failed: 0,
            files: Vec::new(),
            output_dir: output_dir.into(),
            duration: Duration::from_secs(0),
            errors: Vec::new(),
            verification_report: None,
            interrupted: false,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Set the verification report
    pub fn set_verification_report(&mut self, report: VerificationReport) {
        self.verification_report = Some(report);
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed == 0
            && self.errors.is_empty()
            && self
                .verification_report
                .as_ref()
                .map_or(true, VerificationReport::is_success)
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 100.0;
        }
        (self.succeeded as f64 / self.attempted as f64) * 100.0
    }

    /// Total notes across written files
    pub fn notes_written(&self) -> usize {
        self.files.iter().map(|f| f.notes).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_notes = self.total_notes,
            attempted = self.attempted,
            succeeded = self.succeeded,
            failed = self.failed,
            skipped_unknown_folder = self.skipped_unknown_folder,
            resources_embedded = self.resources_embedded,
            resources_failed = self.resources_failed,
            files = self.files.len(),
            output_dir = %self.output_dir.display(),
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            interrupted = self.interrupted,
            "Export summary"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or_default(),
                    "Export error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Invalid or expired cookies
    Credential,
    /// Network failure, timeout or unexpected status
    Transport,
    /// Malformed response payload
    Format,
    /// Document rendering or file writing
    Output,
    /// Configuration or input validation
    Configuration,
    /// Unknown error
    Unknown,
}

impl From<&MinoteError> for ExportErrorType {
    fn from(error: &MinoteError) -> Self {
        match error {
            MinoteError::Credential(_) => ExportErrorType::Credential,
            MinoteError::Transport(_) => ExportErrorType::Transport,
            MinoteError::Format(_) | MinoteError::Serialization(_) => ExportErrorType::Format,
            MinoteError::Output(_) | MinoteError::Io(_) => ExportErrorType::Output,
            MinoteError::Configuration(_) | MinoteError::Validation(_) => {
                ExportErrorType::Configuration
            }
        }
    }
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., note id, folder name)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

impl From<&MinoteError> for ExportError {
    fn from(error: &MinoteError) -> Self {
        ExportError::new(error.into(), error.to_string())
    }
}
