//! Embedded image resolution
//!
//! The service marks an image inside note markup as `☺ <fileid><0/><imgshow/>`:
//! the marker character, a file id, then two self-closing tags. Each marker is
//! fetched, embedded as a [`ResourceRecord`], and replaced by an `<en-media>`
//! reference. A marker whose fetch fails stays in the content verbatim.

use super::record::{build_record, normalize_mime};
use crate::adapters::minote::NoteServiceClient;
use crate::domain::{FileId, MinoteError, NoteId, ResourceRecord, Result, TransportError};
use futures::stream::{self, StreamExt};
use regex::Regex;
use std::ops::Range;

const PLACEHOLDER_PATTERN: &str = r"☺([^<]+?)<[^/]+/><[^/]*/>";

/// Assumed when an image response has no `Content-Type`
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// One marker found in a note's markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the whole marker in the source markup
    pub span: Range<usize>,
    pub file_id: FileId,
}

/// Markup with resolved markers replaced, plus the embedded records
#[derive(Debug, Clone, Default)]
pub struct ResolvedContent {
    pub content: String,
    /// Records in marker order
    pub resources: Vec<ResourceRecord>,
    /// Markers left in place because their fetch failed
    pub failed: usize,
}

pub struct ResourceResolver {
    client: NoteServiceClient,
    max_workers: usize,
    placeholder: Regex,
}

impl ResourceResolver {
    /// Creates a resolver fetching at most `max_workers` images at once
    pub fn new(client: NoteServiceClient, max_workers: usize) -> Result<Self> {
        let placeholder = Regex::new(PLACEHOLDER_PATTERN).map_err(|e| {
            MinoteError::Configuration(format!("Invalid placeholder pattern: {e}"))
        })?;
        Ok(Self {
            client,
            max_workers: max_workers.max(1),
            placeholder,
        })
    }

    /// Finds every image marker, in document order
    ///
    /// Markers whose id is blank after trimming are ignored.
    pub fn find_placeholders(&self, markup: &str) -> Vec<Placeholder> {
        self.placeholder
            .captures_iter(markup)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let file_id = FileId::new(caps.get(1)?.as_str()).ok()?;
                Some(Placeholder {
                    span: whole.range(),
                    file_id,
                })
            })
            .collect()
    }

    /// Fetches every marker's image and substitutes its `<en-media>` tag
    ///
    /// Up to `max_workers` fetches run concurrently; results are applied in
    /// marker order regardless of completion order.
    ///
    /// # Errors
    ///
    /// Only [`MinoteError::Credential`] is returned. Every other per-image
    /// failure is logged and counted in [`ResolvedContent::failed`].
    pub async fn resolve(&self, note_id: &NoteId, markup: &str) -> Result<ResolvedContent> {
        let placeholders = self.find_placeholders(markup);
        if placeholders.is_empty() {
            return Ok(ResolvedContent {
                content: markup.to_string(),
                ..Default::default()
            });
        }

        tracing::debug!(
            note_id = %note_id,
            count = placeholders.len(),
            "Fetching embedded images"
        );

        let results: Vec<Result<ResourceRecord>> = stream::iter(
            placeholders
                .iter()
                .map(|placeholder| self.fetch_record(&placeholder.file_id)),
        )
        .buffered(self.max_workers)
        .collect()
        .await;

        let mut resolved = ResolvedContent {
            content: String::with_capacity(markup.len()),
            ..Default::default()
        };
        let mut cursor = 0usize;

        for (placeholder, result) in placeholders.iter().zip(results) {
            match result {
                Ok(record) => {
                    resolved
                        .content
                        .push_str(&markup[cursor..placeholder.span.start]);
                    resolved.content.push_str(&record.media_tag());
                    cursor = placeholder.span.end;
                    resolved.resources.push(record);
                }
                Err(e @ MinoteError::Credential(_)) => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        note_id = %note_id,
                        file_id = %placeholder.file_id,
                        error = %e,
                        "Skipping embedded image"
                    );
                    resolved.failed += 1;
                }
            }
        }
        resolved.content.push_str(&markup[cursor..]);

        Ok(resolved)
    }

    async fn fetch_record(&self, file_id: &FileId) -> Result<ResourceRecord> {
        let response = self.client.fetch_resource(file_id).await?;

        let mime = normalize_mime(response.header("content-type").unwrap_or(DEFAULT_IMAGE_MIME));
        if !mime.starts_with("image/") {
            return Err(TransportError::UnsupportedContent(format!(
                "{mime} for file {file_id}"
            ))
            .into());
        }

        Ok(build_record(&response.body, &mime))
    }
}
