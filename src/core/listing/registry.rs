//! Folder registry
//!
//! Maps folder ids to buckets in discovery order. The registry is seeded with
//! the two folders every account has and only grows from folder definitions
//! the service announces; it never invents a bucket for an unknown id.

use crate::adapters::minote::FolderDefinition;
use crate::domain::folder::{PRIVATE_FOLDER_NAME, UNCATEGORIZED_FOLDER_NAME};
use crate::domain::{FolderBucket, FolderId, NoteEntry};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct FolderRegistry {
    buckets: Vec<FolderBucket>,
    index: HashMap<FolderId, usize>,
}

impl FolderRegistry {
    /// Registry holding only the well-known folders
    pub fn new() -> Self {
        let mut registry = Self {
            buckets: Vec::new(),
            index: HashMap::new(),
        };
        registry.merge(FolderId::uncategorized(), UNCATEGORIZED_FOLDER_NAME);
        registry.merge(FolderId::private(), PRIVATE_FOLDER_NAME);
        registry
    }

    /// Adds a folder, or renames it in place if already known
    ///
    /// A blank name never overwrites an existing one.
    pub fn merge(&mut self, id: FolderId, name: &str) {
        let name = name.trim();
        match self.index.get(&id) {
            Some(&pos) => {
                if !name.is_empty() {
                    self.buckets[pos].name = name.to_string();
                }
            }
            None => {
                let name = if name.is_empty() {
                    format!("Folder {id}")
                } else {
                    name.to_string()
                };
                self.index.insert(id.clone(), self.buckets.len());
                self.buckets.push(FolderBucket::new(id, name));
            }
        }
    }

    /// Merges every folder announced by a listing page
    pub fn merge_definitions(&mut self, definitions: &[FolderDefinition]) {
        for definition in definitions {
            self.merge(definition.id.clone(), &definition.subject);
        }
    }

    /// Files the entry under its folder
    ///
    /// Returns `false`, leaving the registry untouched, when the folder id
    /// is missing or unknown.
    pub fn assign(&mut self, entry: &NoteEntry) -> bool {
        let Some(folder_id) = &entry.folder_id else {
            return false;
        };
        match self.index.get(folder_id) {
            Some(&pos) => {
                self.buckets[pos].note_ids.push(entry.id.clone());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &FolderId) -> Option<&FolderBucket> {
        self.index.get(id).map(|&pos| &self.buckets[pos])
    }

    /// Buckets in registry order
    pub fn buckets(&self) -> &[FolderBucket] {
        &self.buckets
    }

    /// Number of notes filed across all buckets
    pub fn total_notes(&self) -> usize {
        self.buckets.iter().map(FolderBucket::len).sum()
    }
}

impl Default for FolderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
