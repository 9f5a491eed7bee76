//! Post-export verification of written `.enex` files

use super::checksum::calculate_file_checksum;
use super::report::{VerificationFailure, VerificationReport};
use crate::core::export::ChunkFile;
use std::time::Instant;

/// Re-hashes every written file and compares it with the checksum recorded at write time
pub async fn verify_chunk_files(files: &[ChunkFile]) -> VerificationReport {
    let start = Instant::now();
    let mut report = VerificationReport::new();

    tracing::info!(files = files.len(), "Starting post-export verification");

    for file in files {
        match calculate_file_checksum(&file.path).await {
            Ok(actual) if actual == file.sha256 => report.record_pass(),
            Ok(actual) => {
                tracing::warn!(path = %file.path.display(), "Checksum mismatch");
                report.record_failure(VerificationFailure {
                    path: file.path.clone(),
                    expected_checksum: file.sha256.clone(),
                    actual_checksum: Some(actual),
                    reason: "checksum mismatch".to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(path = %file.path.display(), error = %e, "Could not read written file");
                report.record_failure(VerificationFailure {
                    path: file.path.clone(),
                    expected_checksum: file.sha256.clone(),
                    actual_checksum: None,
                    reason: e.to_string(),
                });
            }
        }
    }

    report.set_duration(start.elapsed().as_millis() as u64);

    tracing::info!(
        passed = report.passed,
        failed = report.failed,
        duration_ms = report.duration_ms,
        "Verification completed"
    );

    report
}
