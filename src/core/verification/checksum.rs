//! Checksum calculation for written documents
//!
//! Every `.enex` file is fingerprinted with SHA-256 at write time so that
//! a later pass can detect truncated or altered output.

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use minote::core::verification::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(b"<en-export/>");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Calculate SHA-256 checksum of a file on disk
pub async fn calculate_file_checksum(path: &Path) -> Result<String> {
    let data = tokio::fs::read(path).await?;
    Ok(calculate_checksum_bytes(&data))
}
