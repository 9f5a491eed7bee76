//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Minote configuration file.

use crate::adapters::minote::SessionCookies;
use crate::config::load_config;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let cookies = match SessionCookies::parse(config.service.cookies.expose_secret().as_ref())
        {
            Ok(cookies) => cookies,
            Err(e) => {
                println!("❌ Session cookies are not usable");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Service: {}", config.service.base_url);
        println!(
            "  Cookies: {} ({})",
            cookies.len(),
            cookies.names().collect::<Vec<_>>().join(", ")
        );
        println!("  Timeout: {}s", config.service.timeout_seconds);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  Notes per File: {}", config.export.chunk_size);
        println!("  Image Workers: {}", config.export.max_workers);
        println!("  Page Size: {}", config.export.page_size);
        println!(
            "  Credential Check Interval: {}",
            config.export.credential_check_interval
        );
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();
        Ok(0)
    }
}
