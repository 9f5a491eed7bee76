//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use minote::logging::init_logging;
//! use minote::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a folder export
///
/// # Example
///
/// ```no_run
/// use minote::log_folder_start;
///
/// log_folder_start!("Recipes", 12);
/// ```
#[macro_export]
macro_rules! log_folder_start {
    ($folder:expr, $count:expr) => {
        tracing::info!(
            folder = %$folder,
            note_count = $count,
            "Exporting folder"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use minote::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42, 3, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($succeeded:expr, $failed:expr, $duration:expr) => {
        tracing::info!(
            succeeded = $succeeded,
            failed = $failed,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use minote::log_error_with_context;
/// use minote::domain::MinoteError;
///
/// let error = MinoteError::Format("missing entry".to_string());
/// log_error_with_context!(&error, "note_id=42");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
