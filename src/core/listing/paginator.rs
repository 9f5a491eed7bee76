//! Paginated retrieval of the full note listing

use super::registry::FolderRegistry;
use crate::adapters::minote::NoteServiceClient;
use crate::domain::{FolderId, NoteEntry, Result};

/// Result of a complete listing traversal
#[derive(Debug, Clone)]
pub struct Listing {
    /// Every entry in retrieval order, including ones whose folder is unknown
    pub entries: Vec<NoteEntry>,
    /// Buckets with note ids filed
    pub registry: FolderRegistry,
    /// Entries dropped because their folder id matched no bucket
    pub skipped_unknown_folder: usize,
    /// Listing requests made, including the final empty page
    pub pages: usize,
}

/// Walks the listing endpoint with the continuation cursor until exhausted
pub struct Paginator<'a> {
    client: &'a NoteServiceClient,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a NoteServiceClient) -> Self {
        Self { client }
    }

    /// Retrieves every note entry and files it into its folder bucket
    ///
    /// Traversal ends at the first page with no entries. Folder definitions
    /// from every page are merged before any entry is filed, so an entry
    /// may reference a folder announced on a later page.
    ///
    /// # Errors
    ///
    /// Any failure aborts the traversal and discards what was collected:
    /// [`crate::domain::MinoteError::Credential`] on an auth failure,
    /// [`crate::domain::MinoteError::Transport`] on any other request failure,
    /// [`crate::domain::MinoteError::Format`] on an undecodable page.
    pub async fn retrieve_all(&self) -> Result<Listing> {
        let mut registry = FolderRegistry::new();
        let mut entries: Vec<NoteEntry> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.client.fetch_page(cursor.as_deref()).await?;
            pages += 1;

            registry.merge_definitions(&page.folders);

            if page.entries.is_empty() {
                break;
            }

            tracing::debug!(
                page = pages,
                entries = page.entries.len(),
                folders = page.folders.len(),
                "Fetched listing page"
            );
            entries.extend(page.entries);

            match page.sync_tag {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                Some(_) => {
                    tracing::warn!(page = pages, "Listing cursor did not advance, stopping");
                    break;
                }
                None => {
                    tracing::warn!(page = pages, "Listing page carried no cursor, stopping");
                    break;
                }
            }
        }

        let mut skipped = 0usize;
        for entry in &entries {
            if !registry.assign(entry) {
                skipped += 1;
                tracing::warn!(
                    note_id = %entry.id,
                    folder_id = entry.folder_id.as_ref().map(FolderId::as_str).unwrap_or("none"),
                    "Note references an unknown folder and will not be exported"
                );
            }
        }

        tracing::info!(
            notes = entries.len(),
            folders = registry.buckets().len(),
            pages,
            skipped_unknown_folder = skipped,
            "Note listing retrieved"
        );

        Ok(Listing {
            entries,
            registry,
            skipped_unknown_folder: skipped,
            pages,
        })
    }
}
