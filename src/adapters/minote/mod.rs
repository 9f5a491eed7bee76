//! Xiaomi Cloud Notes adapter
//!
//! This module provides the integration with the note service: the HTTP
//! transport seam, cookie handling, wire models and the typed client.

pub mod client;
pub mod cookies;
pub mod models;
pub mod transport;

pub use client::NoteServiceClient;
pub use cookies::SessionCookies;
pub use models::{FolderDefinition, ListingPage};
pub use transport::{HttpTransport, Transport, TransportResponse};
