//! Configuration schema types
//!
//! This module defines the configuration structure for Minote.

use crate::config::{secret_string, SecretString};
use serde::{Deserialize, Serialize};

/// Main Minote configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional in the file; missing keys fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MinoteConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Note service connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MinoteConfig {
    /// Validates the configuration
    ///
    /// Cookie syntax is checked separately when the client is built, so a
    /// configuration without cookies still validates (they may come from
    /// the command line).
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.service.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Note service connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the note service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Browser session cookies (`name=value; name2=value2`)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default = "default_cookies")]
    pub cookies: SecretString,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("service.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("service.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "service.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cookies: default_cookies(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Notes per output file before a new part is started
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Directory receiving the `.enex` files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Concurrent image downloads per note
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Accepted and validated, but no request path retries
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Entries requested per listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Re-check credentials after this many processed notes
    #[serde(default = "default_credential_check_interval")]
    pub credential_check_interval: usize,

    /// Print machine-readable `PROGRESS:` lines on stdout
    #[serde(default)]
    pub progress_report: bool,

    /// Re-read every written file and compare it with its recorded checksum
    #[serde(default = "default_verify_output")]
    pub verify_output: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 || self.chunk_size > 1000 {
            return Err(format!(
                "export.chunk_size must be between 1 and 1000, got {}",
                self.chunk_size
            ));
        }

        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.max_workers == 0 || self.max_workers > 64 {
            return Err(format!(
                "export.max_workers must be between 1 and 64, got {}",
                self.max_workers
            ));
        }

        if self.max_retries > 10 {
            return Err(format!(
                "export.max_retries must be <= 10, got {}",
                self.max_retries
            ));
        }

        if self.page_size == 0 || self.page_size > 1000 {
            return Err(format!(
                "export.page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }

        if self.credential_check_interval == 0 {
            return Err("export.credential_check_interval must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            output_dir: default_output_dir(),
            max_workers: default_max_workers(),
            max_retries: default_max_retries(),
            page_size: default_page_size(),
            credential_check_interval: default_credential_check_interval(),
            progress_report: false,
            verify_output: default_verify_output(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://i.mi.com/".to_string()
}

fn default_cookies() -> SecretString {
    secret_string(String::new())
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_chunk_size() -> usize {
    50
}

fn default_output_dir() -> String {
    "exported_notes".to_string()
}

fn default_max_workers() -> usize {
    5
}

fn default_max_retries() -> usize {
    3
}

fn default_page_size() -> usize {
    200
}

fn default_credential_check_interval() -> usize {
    20
}

fn default_verify_output() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
