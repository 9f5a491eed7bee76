//! Domain models and types for Minote.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`NoteId`], [`FolderId`], [`FileId`])
//! - **Domain models** ([`NoteEntry`], [`ExportNote`], [`FolderBucket`], [`ResourceRecord`])
//! - **Error types** ([`MinoteError`], [`TransportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MinoteError>`]:
//!
//! ```rust,no_run
//! use minote::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = minote::config::load_config("minote.toml")?;
//!     println!("Exporting to {}", config.export.output_dir);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod folder;
pub mod ids;
pub mod note;
pub mod resource;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{MinoteError, TransportError};
pub use folder::FolderBucket;
pub use ids::{FileId, FolderId, NoteId};
pub use note::{ExportNote, NoteEntry};
pub use resource::ResourceRecord;
pub use result::Result;
