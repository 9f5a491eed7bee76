//! Export command implementation
//!
//! This module implements the `export` command, which writes every note
//! of the account into `.enex` files.

use crate::cli::exit_code_for;
use crate::config::{load_config, secret_string, MinoteConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use clap::Args;
use std::io::{self, Write};
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the session cookie string (`name=value; name2=value2`)
    #[arg(long, env = "MINOTE_COOKIES", hide_env_values = true)]
    pub cookies: Option<String>,

    /// Override notes per output file
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Override concurrent image downloads per note
    #[arg(long)]
    pub max_workers: Option<usize>,

    /// Print machine-readable PROGRESS lines on stdout
    #[arg(long)]
    pub progress_report: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Confirmation prompt (unless --yes)
        if !self.yes && !config.export.progress_report {
            println!("Export Configuration:");
            println!("  Service: {}", config.service.base_url);
            println!("  Output directory: {}", config.export.output_dir);
            println!("  Notes per file: {}", config.export.chunk_size);
            println!("  Image downloads per note: {}", config.export.max_workers);
            println!();
            print!("Proceed with export? [y/N]: ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        let coordinator = match ExportCoordinator::new(config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        tracing::info!("Executing export");
        eprintln!("🚀 Starting export...");

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        print_summary(&summary);

        let exit_code = if summary.interrupted {
            println!("⚠️  Export interrupted. Files written so far are complete.");
            tracing::info!("Export interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }

    fn apply_overrides(&self, config: &mut MinoteConfig) {
        if let Some(cookies) = &self.cookies {
            tracing::info!("Using session cookies from the command line");
            config.service.cookies = secret_string(cookies.clone());
        }
        if let Some(chunk_size) = self.chunk_size {
            tracing::info!(chunk_size, "Overriding chunk size from CLI");
            config.export.chunk_size = chunk_size;
        }
        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }
        if let Some(timeout) = self.timeout {
            tracing::info!(timeout, "Overriding request timeout from CLI");
            config.service.timeout_seconds = timeout;
        }
        if let Some(max_workers) = self.max_workers {
            tracing::info!(max_workers, "Overriding worker count from CLI");
            config.export.max_workers = max_workers;
        }
        if self.progress_report {
            config.export.progress_report = true;
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Notes listed: {}", summary.total_notes);
    println!("  Attempted: {}", summary.attempted);
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    if summary.skipped_unknown_folder > 0 {
        println!(
            "  Skipped (unknown folder): {}",
            summary.skipped_unknown_folder
        );
    }
    println!(
        "  Images: {} embedded, {} left as placeholders",
        summary.resources_embedded, summary.resources_failed
    );
    println!("  Files written: {}", summary.files.len());
    println!("  Output directory: {}", summary.output_dir.display());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if let Some(report) = &summary.verification_report {
        println!("🔍 Verification Results:");
        println!("  Files checked: {}", report.total_verified);
        println!("  Passed: {}", report.passed);
        println!("  Failed: {}", report.failed);
        for failure in &report.failures {
            println!("    - {}: {}", failure.path.display(), failure.reason);
        }
        println!();
    }

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for (i, error) in summary.errors.iter().enumerate() {
            if i == 10 {
                println!("  ... and {} more", summary.errors.len() - 10);
                break;
            }
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }
}
