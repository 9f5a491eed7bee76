// Minote - Xiaomi Cloud Notes to Evernote Exporter
// Copyright (c) 2025 Minote Contributors
// Licensed under the MIT License

//! # Minote - Xiaomi Cloud Notes to Evernote Exporter
//!
//! Minote downloads every note from a Xiaomi Cloud Notes account, using the
//! session cookies of a logged-in browser, and writes them as Evernote
//! `.enex` files that Evernote (or any ENEX-aware tool) can import.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Listing** all notes with the service's continuation cursor
//! - **Embedding** note images as hashed, base64-encoded resources
//! - **Translating** the service's rich-text markup into ENML
//! - **Writing** one `.enex` file per folder, split into parts at a threshold
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (listing, resources, transform, export, verification)
//! - [`adapters`] - HTTP access to the notes service
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minote::config::load_config;
//! use minote::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("minote.toml")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = ExportCoordinator::new(config, shutdown_rx)?;
//!
//!     let summary = coordinator.execute_export().await?;
//!     println!("Exported {} notes into {} files", summary.succeeded, summary.files.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error is
//! [`domain::MinoteError`]. Credential errors always abort a run; transport
//! and format errors on a single note are counted and the run continues.
//!
//! ## Logging
//!
//! Minote uses structured logging with the `tracing` crate. Cookie values
//! are never logged.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
