//! Check command implementation
//!
//! Confirms the session cookies are accepted, walks the full listing and
//! estimates the size of an export without writing any file.

use crate::adapters::minote::{NoteServiceClient, SessionCookies};
use crate::cli::exit_code_for;
use crate::config::{load_config, secret_string};
use crate::core::listing::{Listing, Paginator};
use clap::Args;
use secrecy::ExposeSecret;

/// Average exported size of one note, images included
const ESTIMATED_NOTE_KB: usize = 200;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Override the session cookie string (`name=value; name2=value2`)
    #[arg(long, env = "MINOTE_COOKIES", hide_env_values = true)]
    pub cookies: Option<String>,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking session and estimating export size");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };
        if let Some(cookies) = &self.cookies {
            config.service.cookies = secret_string(cookies.clone());
        }

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            return Ok(2);
        }
        if let Err(e) = SessionCookies::parse(config.service.cookies.expose_secret().as_ref()) {
            println!("❌ Session cookies are not usable");
            println!("   Error: {e}");
            return Ok(2);
        }

        let client = match NoteServiceClient::from_config(&config.service, &config.export) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if let Err(e) = client.probe().await {
            println!("❌ Session check failed");
            println!("   Error: {e}");
            return Ok(exit_code_for(&e));
        }
        println!("✅ Session cookies accepted");

        let listing = match Paginator::new(&client).retrieve_all().await {
            Ok(l) => l,
            Err(e) => {
                println!("❌ Failed to retrieve the note listing");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        print_estimate(&listing);
        Ok(0)
    }
}

/// Estimated export size in megabytes, rounded to one decimal
pub fn estimate_size_mb(note_count: usize) -> f64 {
    let kb = (note_count * ESTIMATED_NOTE_KB) as f64;
    (kb / 1024.0 * 10.0).round() / 10.0
}

fn print_estimate(listing: &Listing) {
    let total = listing.entries.len();
    println!();
    println!("📊 Account Summary:");
    println!("  Notes: {total}");
    for bucket in listing.registry.buckets().iter().filter(|b| !b.is_empty()) {
        println!("    {}: {}", bucket.name, bucket.len());
    }
    if listing.skipped_unknown_folder > 0 {
        println!(
            "  Notes in unknown folders (not exported): {}",
            listing.skipped_unknown_folder
        );
    }
    println!(
        "  Estimated size: {} MB ({ESTIMATED_NOTE_KB} KB per note)",
        estimate_size_mb(total)
    );
    println!();
}
