//! Post-export verification
//!
//! Written files are fingerprinted with SHA-256 and, when
//! `export.verify_output` is enabled, re-read after the run to confirm
//! they were not truncated or altered.

pub mod checksum;
pub mod report;
pub mod verify;

pub use report::{VerificationFailure, VerificationReport};
pub use verify::verify_chunk_files;
