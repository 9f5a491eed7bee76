//! Wire models for the note service's JSON responses

use crate::domain::{FolderId, NoteEntry};
use serde::Deserialize;

/// Every JSON endpoint wraps its payload in `{"data": ...}`
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// One page of the note listing
#[derive(Debug, Default, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub entries: Vec<NoteEntry>,

    #[serde(default)]
    pub folders: Vec<FolderDefinition>,

    /// Continuation cursor for the next page
    #[serde(default, rename = "syncTag")]
    pub sync_tag: Option<String>,
}

/// A folder announced by a listing page
#[derive(Debug, Clone, Deserialize)]
pub struct FolderDefinition {
    pub id: FolderId,

    /// Display name
    #[serde(default)]
    pub subject: String,
}

/// Payload of the single-note endpoint
#[derive(Debug, Deserialize)]
pub struct NoteDetail {
    pub entry: NoteEntry,
}
