//! Configuration management for Minote.
//!
//! Minote reads a TOML file (default `minote.toml`) with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MINOTE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation before any network activity
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use minote::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("minote.toml")?;
//! println!("Service: {}", config.service.base_url);
//! println!("Chunk size: {}", config.export.chunk_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [service]
//! base_url = "https://i.mi.com/"
//! cookies = "${MINOTE_COOKIES}"
//! timeout_seconds = 30
//!
//! [export]
//! chunk_size = 50
//! output_dir = "exported_notes"
//! max_workers = 5
//! verify_output = true
//!
//! [logging]
//! local_enabled = false
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, ExportConfig, LoggingConfig, MinoteConfig, ServiceConfig};
pub use secret::{secret_string, SecretString, SecretValue};
