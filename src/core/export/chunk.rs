//! Chunked `.enex` output per folder
//!
//! A folder's notes accumulate in memory until the chunk threshold is
//! reached; the chunk is then written as `<name>_partNN.enex` and released.
//! A folder that never needed splitting is written unsuffixed as
//! `<name>.enex`.

use super::enex::render_document;
use crate::core::transform::timestamp;
use crate::core::verification::checksum::calculate_checksum_bytes;
use crate::domain::{ExportNote, MinoteError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const ILLEGAL_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const MAX_FILE_NAME_CHARS: usize = 200;
const FALLBACK_FILE_NAME: &str = "Untitled folder";

/// A document written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFile {
    pub path: PathBuf,
    /// Notes contained in the document
    pub notes: usize,
    /// Size of the written document
    pub bytes: u64,
    /// SHA-256 of the written bytes
    pub sha256: String,
}

/// Makes a folder name safe to use as a file name
///
/// Each of `< > : " / \ | ? *` becomes `_`, the result is cut to 200
/// characters and trimmed.
///
/// ```
/// use minote::core::export::sanitize_folder_name;
///
/// assert_eq!(sanitize_folder_name("Work/Projects: 2024?"), "Work_Projects_ 2024_");
/// ```
pub fn sanitize_folder_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if ILLEGAL_FILE_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .take(MAX_FILE_NAME_CHARS)
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sanitized file name for a folder, unique within `claimed`
///
/// Names are compared case-insensitively. A collision gets a ` (2)`,
/// ` (3)`, ... suffix, cutting the name so it stays within 200 characters.
pub fn claim_file_name(folder_name: &str, claimed: &mut HashSet<String>) -> String {
    let base = sanitize_folder_name(folder_name);
    let mut candidate = base.clone();
    let mut counter = 1usize;

    while !claimed.insert(candidate.to_lowercase()) {
        counter += 1;
        let suffix = format!(" ({counter})");
        let stem: String = base
            .chars()
            .take(MAX_FILE_NAME_CHARS - suffix.chars().count())
            .collect();
        candidate = format!("{}{suffix}", stem.trim_end());
    }

    if counter > 1 {
        tracing::warn!(
            folder = %folder_name,
            file_name = %candidate,
            "Folder name collides with another folder's file name, using a suffix"
        );
    }
    candidate
}

/// Accumulates one folder's notes and writes them out in chunks
pub struct ChunkedDocumentWriter {
    output_dir: PathBuf,
    base_name: String,
    threshold: usize,
    chunk: Vec<ExportNote>,
    /// Number of the next `_partNN` suffix
    part: usize,
    files: Vec<ChunkFile>,
}

impl ChunkedDocumentWriter {
    /// Creates a writer for the folder `folder_name`
    ///
    /// A threshold of zero is treated as one.
    pub fn new(output_dir: impl Into<PathBuf>, folder_name: &str, threshold: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_name: sanitize_folder_name(folder_name),
            threshold: threshold.max(1),
            chunk: Vec::new(),
            part: 1,
            files: Vec::new(),
        }
    }

    /// Adds a note to the open chunk
    pub fn append(&mut self, note: ExportNote) {
        self.chunk.push(note);
    }

    /// Notes in the open chunk
    pub fn pending(&self) -> usize {
        self.chunk.len()
    }

    /// Writes the open chunk as the next part if it is full and the folder
    /// still has `remaining` notes to process
    ///
    /// Returns the written file, if any.
    pub fn maybe_flush(&mut self, remaining: usize) -> Result<Option<&ChunkFile>> {
        if self.chunk.len() < self.threshold || remaining == 0 {
            return Ok(None);
        }

        let file_name = self.part_file_name();
        self.write_chunk(&file_name)?;
        self.part += 1;
        Ok(self.files.last())
    }

    /// Writes whatever is left and returns every file written for the folder
    ///
    /// The last chunk keeps the part numbering once a part has been
    /// flushed; otherwise the folder is written unsuffixed. Nothing is
    /// written for an empty final chunk.
    pub fn finalize(mut self) -> Result<Vec<ChunkFile>> {
        if !self.chunk.is_empty() {
            let file_name = if self.files.is_empty() {
                format!("{}.enex", self.base_name)
            } else {
                self.part_file_name()
            };
            self.write_chunk(&file_name)?;
        }
        Ok(self.files)
    }

    fn part_file_name(&self) -> String {
        format!("{}_part{:02}.enex", self.base_name, self.part)
    }

    fn write_chunk(&mut self, file_name: &str) -> Result<()> {
        let notes = std::mem::take(&mut self.chunk);
        let document = render_document(&notes, &timestamp::now())?;

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            MinoteError::Output(format!(
                "Failed to create output directory {}: {e}",
                self.output_dir.display()
            ))
        })?;

        let path = self.output_dir.join(file_name);
        write_file(&path, &document)?;

        tracing::info!(
            path = %path.display(),
            notes = notes.len(),
            bytes = document.len(),
            "Wrote export file"
        );

        self.files.push(ChunkFile {
            path,
            notes: notes.len(),
            bytes: document.len() as u64,
            sha256: calculate_checksum_bytes(&document),
        });
        Ok(())
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)
        .map_err(|e| MinoteError::Output(format!("Failed to write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteId;
    use test_case::test_case;

    fn note(id: usize) -> ExportNote {
        ExportNote {
            id: NoteId::new(id.to_string()).unwrap(),
            title: format!("Note {id}"),
            created: "20240101T000000Z".to_string(),
            updated: "20240101T000000Z".to_string(),
            body: "body".to_string(),
            resources: Vec::new(),
        }
    }

    /// Drives the writer the way the export loop does
    fn export_folder(dir: &Path, name: &str, threshold: usize, count: usize) -> Vec<ChunkFile> {
        let mut writer = ChunkedDocumentWriter::new(dir, name, threshold);
        for i in 0..count {
            writer.append(note(i));
            writer.maybe_flush(count - i - 1).unwrap();
        }
        writer.finalize().unwrap()
    }

    fn file_names(files: &[ChunkFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test_case("Work/Projects", "Work_Projects" ; "slash")]
    #[test_case(r#"a<b>c:d"e\f|g?h*"#, "a_b_c_d_e_f_g_h_" ; "every illegal char")]
    #[test_case("  padded  ", "padded" ; "trimmed")]
    #[test_case("   ", "Untitled folder" ; "blank")]
    #[test_case("日记", "日记" ; "non ascii kept")]
    fn test_sanitize_folder_name(input: &str, expected: &str) {
        assert_eq!(sanitize_folder_name(input), expected);
    }

    #[test]
    fn test_sanitize_truncates_to_200_chars() {
        let long = "é".repeat(250);
        assert_eq!(sanitize_folder_name(&long).chars().count(), 200);
    }

    #[test]
    fn test_claim_file_name_deduplicates() {
        let mut claimed = HashSet::new();
        assert_eq!(claim_file_name("Work/A", &mut claimed), "Work_A");
        assert_eq!(claim_file_name("Work_A", &mut claimed), "Work_A (2)");
        assert_eq!(claim_file_name("work_a", &mut claimed), "work_a (3)");
        assert_eq!(claim_file_name("Home", &mut claimed), "Home");
    }

    #[test]
    fn test_claimed_long_name_stays_within_limit() {
        let mut claimed = HashSet::new();
        let long = "x".repeat(250);
        claim_file_name(&long, &mut claimed);
        let second = claim_file_name(&long, &mut claimed);

        assert_eq!(second.chars().count(), 200);
        assert!(second.ends_with(" (2)"));
        assert_eq!(sanitize_folder_name(&second), second);
    }

    #[test]
    fn test_five_notes_threshold_two() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_folder(dir.path(), "Notes", 2, 5);

        assert_eq!(
            file_names(&files),
            vec!["Notes_part01.enex", "Notes_part02.enex", "Notes_part03.enex"]
        );
        let counts: Vec<usize> = files.iter().map(|f| f.notes).collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test_case(3, 3 ; "exactly threshold")]
    #[test_case(5, 1 ; "single note")]
    fn test_single_chunk_is_unsuffixed(threshold: usize, count: usize) {
        let dir = tempfile::tempdir().unwrap();
        let files = export_folder(dir.path(), "Notes", threshold, count);

        assert_eq!(file_names(&files), vec!["Notes.enex"]);
        assert_eq!(files[0].notes, count);
    }

    #[test]
    fn test_multiple_of_threshold_has_no_empty_part() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_folder(dir.path(), "Notes", 2, 4);

        assert_eq!(
            file_names(&files),
            vec!["Notes_part01.enex", "Notes_part02.enex"]
        );
    }

    #[test]
    fn test_empty_folder_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_folder(dir.path(), "Notes", 2, 0);

        assert!(files.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_flush_waits_for_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = ChunkedDocumentWriter::new(dir.path(), "Notes", 2);

        writer.append(note(1));
        assert!(writer.maybe_flush(5).unwrap().is_none());
        writer.append(note(2));
        assert!(writer.maybe_flush(0).unwrap().is_none());
        assert_eq!(writer.pending(), 2);
    }

    #[test]
    fn test_chunk_file_record_matches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_folder(dir.path(), "Notes", 10, 2);

        let written = fs::read(&files[0].path).unwrap();
        assert_eq!(files[0].bytes, written.len() as u64);
        assert_eq!(files[0].sha256, calculate_checksum_bytes(&written));
    }

    #[test]
    fn test_output_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let files = export_folder(&nested, "Notes", 10, 1);

        assert!(files[0].path.starts_with(&nested));
        assert!(files[0].path.exists());
    }
}
