//! Note models
//!
//! [`NoteEntry`] is a note as the service returns it; [`ExportNote`] is the
//! same note after resource resolution and markup translation, ready to be
//! appended to an output chunk.

use super::ids::{FolderId, NoteId};
use super::resource::ResourceRecord;
use serde::Deserialize;

/// Title used when a note carries none
pub const UNTITLED_NOTE: &str = "Untitled note";

/// A note entry as delivered by the listing and note endpoints
///
/// Timestamps are epoch values in either seconds or milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEntry {
    pub id: NoteId,

    /// Raw proprietary markup; listing pages may omit it
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub create_date: i64,

    #[serde(default)]
    pub modify_date: i64,

    /// Absent on some entries; such notes belong to no known folder
    #[serde(default)]
    pub folder_id: Option<FolderId>,

    /// JSON-encoded metadata blob, e.g. `{"title":"Groceries"}`
    #[serde(default)]
    pub extra_info: Option<String>,
}

impl NoteEntry {
    /// Title from the metadata blob, or [`UNTITLED_NOTE`]
    pub fn title(&self) -> String {
        self.extra_info
            .as_deref()
            .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
            .and_then(|value| {
                value
                    .get("title")
                    .and_then(|t| t.as_str())
                    .map(|t| t.trim().to_string())
            })
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_NOTE.to_string())
    }
}

/// A fully translated note with its embedded resources
#[derive(Debug, Clone)]
pub struct ExportNote {
    pub id: NoteId,
    pub title: String,
    /// Creation time formatted as `YYYYMMDDThhmmssZ`
    pub created: String,
    /// Modification time formatted as `YYYYMMDDThhmmssZ`
    pub updated: String,
    /// Translated body, placed inside the ENML envelope at write time
    pub body: String,
    pub resources: Vec<ResourceRecord>,
}
