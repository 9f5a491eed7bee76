//! Note content transformation
//!
//! - [`markup`] - rewrite of the service's rich text into ENML
//! - [`timestamp`] - epoch to ENEX timestamp conversion

pub mod markup;
pub mod timestamp;

pub use markup::{enml_document, escape_text, ContentTranslator};
pub use timestamp::format_timestamp;
