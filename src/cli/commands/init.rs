//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "minote.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Minote configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Log in to https://i.mi.com in a browser");
                println!("  2. Copy the request Cookie header from the developer tools");
                println!("  3. Put it in a .env file as MINOTE_COOKIES=\"...\"");
                println!("  4. Check the session: minote check");
                println!("  5. Run export: minote export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn generate_config() -> String {
        r#"# Minote Configuration File
# Xiaomi Cloud Notes to Evernote Exporter

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[service]
base_url = "https://i.mi.com/"

# Cookie header of a logged-in browser session (keep it out of this file)
cookies = "${MINOTE_COOKIES}"

# Per-request timeout in seconds (1-600)
timeout_seconds = 30

[export]
# Notes per .enex file before a new _partNN file is started (1-1000)
chunk_size = 50

output_dir = "exported_notes"

# Concurrent image downloads per note (1-64)
max_workers = 5

# Validated but currently unused
max_retries = 3

# Entries requested per listing page (1-1000)
page_size = 200

# Re-check the session after this many notes
credential_check_interval = 20

# Print PROGRESS:{json} lines on stdout
progress_report = false

# Re-read written files and compare checksums
verify_output = true

[logging]
# JSON log file in addition to console output
local_enabled = false
local_path = "logs"

# Rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
