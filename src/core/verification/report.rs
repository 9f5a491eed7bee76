//! Verification report structures

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Result of re-checking the files written by an export
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// When the verification was performed
    pub verified_at: DateTime<Utc>,

    /// Number of files checked
    pub total_verified: usize,

    /// Files whose content still matches the recorded checksum
    pub passed: usize,

    /// Files that are missing, unreadable or altered
    pub failed: usize,

    pub failures: Vec<VerificationFailure>,

    /// Duration of verification in milliseconds
    pub duration_ms: u64,
}

/// Details of a failed file check
#[derive(Debug, Clone, Serialize)]
pub struct VerificationFailure {
    pub path: PathBuf,

    /// Checksum recorded when the file was written
    pub expected_checksum: String,

    /// Checksum of the file as found on disk, if it could be read
    pub actual_checksum: Option<String>,

    pub reason: String,
}

impl VerificationReport {
    pub fn new() -> Self {
        Self {
            verified_at: Utc::now(),
            total_verified: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_pass(&mut self) {
        self.total_verified += 1;
        self.passed += 1;
    }

    pub fn record_failure(&mut self, failure: VerificationFailure) {
        self.total_verified += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Check if all verifications passed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Get the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_verified == 0 {
            return 100.0;
        }
        (self.passed as f64 / self.total_verified as f64) * 100.0
    }
}

impl Default for VerificationReport {
    fn default() -> Self {
        Self::new()
    }
}
