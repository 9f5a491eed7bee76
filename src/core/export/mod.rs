//! Export orchestration and output
//!
//! This module provides the export pipeline for Minote, including:
//! - Export coordination and orchestration
//! - ENEX rendering and chunked file output
//! - Progress events and the run summary

pub mod chunk;
pub mod coordinator;
pub mod enex;
pub mod progress;
pub mod summary;

pub use chunk::{claim_file_name, sanitize_folder_name, ChunkFile, ChunkedDocumentWriter};
pub use coordinator::ExportCoordinator;
pub use progress::{ProgressEvent, ProgressReporter, SilentReporter, StdoutReporter};
pub use summary::{ExportError, ExportErrorType, ExportSummary};
