//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Minote using clap.

pub mod commands;

use crate::domain::MinoteError;
use clap::{Parser, Subcommand};

/// Minote - Xiaomi Cloud Notes to Evernote Exporter
#[derive(Parser, Debug)]
#[command(name = "minote")]
#[command(version, about, long_about = None)]
#[command(author = "Minote Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "minote.toml", env = "MINOTE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MINOTE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export all notes to .enex files
    Export(commands::export::ExportArgs),

    /// Check the session cookies and estimate the export size
    Check(commands::check::CheckArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Process exit code for an error that ended a command
pub fn exit_code_for(error: &MinoteError) -> i32 {
    match error {
        MinoteError::Configuration(_) | MinoteError::Validation(_) => 2,
        MinoteError::Credential(_) => 3,
        MinoteError::Transport(_) => 4,
        _ => 5,
    }
}
