//! Core business logic for Minote.
//!
//! # Modules
//!
//! - [`listing`] - Paginated listing retrieval and the folder registry
//! - [`resources`] - Embedded image download and hashing
//! - [`transform`] - Markup translation and timestamp formatting
//! - [`export`] - Orchestration, ENEX rendering and chunked output
//! - [`verification`] - Checksums of written files
//!
//! # Export Workflow
//!
//! 1. **Probe**: confirm the session cookies are accepted
//! 2. **List**: walk the listing with the continuation cursor and file notes into folders
//! 3. **Resolve**: download each note's embedded images
//! 4. **Translate**: rewrite the service markup into ENML
//! 5. **Write**: append to the folder's chunk, flushing `.enex` parts at the threshold
//! 6. **Verify** (optional): re-hash the written files
//! 7. **Report**: produce the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use minote::config::load_config;
//! use minote::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("minote.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::new(config, shutdown_rx)?;
//!
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Succeeded: {}", summary.succeeded);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod listing;
pub mod resources;
pub mod transform;
pub mod verification;
