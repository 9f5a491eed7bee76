//! Embedded resource handling

pub mod record;
pub mod resolver;

pub use record::{build_record, content_hash};
pub use resolver::{Placeholder, ResolvedContent, ResourceResolver};
