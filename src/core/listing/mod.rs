//! Note listing: pagination and folder bucketing

pub mod paginator;
pub mod registry;

pub use paginator::{Listing, Paginator};
pub use registry::FolderRegistry;
