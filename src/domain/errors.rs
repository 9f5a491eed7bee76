//! Domain error types
//!
//! This module defines the error hierarchy for Minote. Errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Minote error type
///
/// This is the primary error type used throughout the application.
/// Whether an error aborts a run depends on the scope it was raised in:
/// a [`MinoteError::Credential`] always does, a [`MinoteError::Transport`]
/// does during listing but only fails the current note elsewhere.
#[derive(Debug, Error)]
pub enum MinoteError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid or expired cloud credentials
    #[error("Credential error: {0}")]
    Credential(String),

    /// Network, timeout or non-success status
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Malformed or unexpected response payload
    #[error("Format error: {0}")]
    Format(String),

    /// Malformed user input detected before any network activity
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure rendering or writing an output document
    #[error("Output error: {0}")]
    Output(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl MinoteError {
    /// Returns true for errors that must abort the whole run regardless of scope
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MinoteError::Credential(_) | MinoteError::Configuration(_) | MinoteError::Validation(_)
        )
    }
}

/// Transport-level errors
///
/// Raised by the HTTP seam and by status checks on its responses.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to reach the service
    #[error("Failed to connect to note service: {0}")]
    ConnectionFailed(String),

    /// The request exceeded its timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-success HTTP status
    #[error("Unexpected status: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body is not of an accepted content type
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),

    /// A request URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MinoteError {
    fn from(err: std::io::Error) -> Self {
        MinoteError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MinoteError {
    fn from(err: serde_json::Error) -> Self {
        MinoteError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MinoteError {
    fn from(err: toml::de::Error) -> Self {
        MinoteError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from XML writer errors
impl From<quick_xml::Error> for MinoteError {
    fn from(err: quick_xml::Error) -> Self {
        MinoteError::Output(format!("XML write error: {err}"))
    }
}
