//! Folder bucket model

use super::ids::{FolderId, NoteId};

/// Display name of folder `0`
pub const UNCATEGORIZED_FOLDER_NAME: &str = "Uncategorized";

/// Display name of folder `2`
pub const PRIVATE_FOLDER_NAME: &str = "Private Notes";

/// A named collection of note ids corresponding to one folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderBucket {
    pub id: FolderId,
    pub name: String,
    /// Note ids in the order they were retrieved
    pub note_ids: Vec<NoteId>,
}

impl FolderBucket {
    /// Creates an empty bucket
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            note_ids: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.note_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.note_ids.len()
    }
}
