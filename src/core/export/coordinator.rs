//! Export coordinator - main orchestrator for the export process
//!
//! This module drives a run end to end: credential probe, listing, then
//! every non-empty folder note by note through fetch, resource resolution,
//! translation and chunked output.

use crate::adapters::minote::NoteServiceClient;
use crate::config::MinoteConfig;
use crate::core::export::chunk::{claim_file_name, ChunkedDocumentWriter};
use crate::core::export::progress::{
    ProgressEvent, ProgressReporter, SilentReporter, StdoutReporter,
};
use crate::core::export::summary::{ExportError, ExportSummary};
use crate::core::listing::Paginator;
use crate::core::resources::ResourceResolver;
use crate::core::transform::{format_timestamp, ContentTranslator};
use crate::core::verification::verify_chunk_files;
use crate::domain::{ExportNote, FolderBucket, MinoteError, NoteId, Result};
use crate::{log_error_with_context, log_export_complete, log_folder_start};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Outcome of exporting one folder
enum FolderOutcome {
    Completed,
    Interrupted,
}

/// Export coordinator
pub struct ExportCoordinator {
    config: MinoteConfig,
    client: NoteServiceClient,
    translator: ContentTranslator,
    resolver: ResourceResolver,
    reporter: Arc<dyn ProgressReporter>,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a new export coordinator talking to the configured service
    ///
    /// # Errors
    ///
    /// [`MinoteError::Validation`] for a malformed cookie string. Nothing is
    /// sent over the network here.
    pub fn new(config: MinoteConfig, shutdown_signal: watch::Receiver<bool>) -> Result<Self> {
        let client = NoteServiceClient::from_config(&config.service, &config.export)?;
        Self::with_client(config, client, shutdown_signal)
    }

    /// Create a coordinator over an existing client
    pub fn with_client(
        config: MinoteConfig,
        client: NoteServiceClient,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let translator = ContentTranslator::new()?;
        let resolver = ResourceResolver::new(client.clone(), config.export.max_workers)?;
        let reporter: Arc<dyn ProgressReporter> = if config.export.progress_report {
            Arc::new(StdoutReporter)
        } else {
            Arc::new(SilentReporter)
        };

        Ok(Self {
            config,
            client,
            translator,
            resolver,
            reporter,
            shutdown_signal,
        })
    }

    /// Replace the progress reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Probes the session cookies
    /// 2. Retrieves the full listing and files notes into folders
    /// 3. For each non-empty folder, in registry order:
    ///    - Fetches each note, embeds its images, translates its markup
    ///    - Appends it to the folder's open chunk, flushing full chunks
    ///    - Re-probes the session every `credential_check_interval` notes
    /// 4. Writes the folder's final chunk
    /// 5. Optionally verifies the written files
    ///
    /// # Errors
    ///
    /// Credential failures at any point and transport failures during the
    /// probe or listing abort the run. Files already written stay on disk.
    /// Failures scoped to one note are counted in the summary instead.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        self.reporter.report(&ProgressEvent::preparing(0));

        match self.run().await {
            Ok(summary) => {
                self.reporter.report(&ProgressEvent::completed());
                Ok(summary)
            }
            Err(e) => {
                log_error_with_context!(&e, "export aborted");
                self.reporter.report(&ProgressEvent::failed());
                Err(e)
            }
        }
    }

    async fn run(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let output_dir = absolute_path(Path::new(&self.config.export.output_dir))?;
        let mut summary = ExportSummary::new(&output_dir);

        tracing::info!(
            chunk_size = self.config.export.chunk_size,
            output_dir = %output_dir.display(),
            "Starting export process"
        );

        self.client.probe().await?;
        tracing::info!("Session cookies accepted");
        self.reporter.report(&ProgressEvent::preparing(10));

        let listing = Paginator::new(&self.client).retrieve_all().await?;
        summary.total_notes = listing.entries.len();
        summary.skipped_unknown_folder = listing.skipped_unknown_folder;
        self.reporter.report(&ProgressEvent::preparing(30));

        let mut claimed_names = HashSet::new();
        for bucket in listing.registry.buckets() {
            if bucket.is_empty() {
                continue;
            }
            if self.shutdown_requested() {
                summary.interrupted = true;
                break;
            }

            let file_name = claim_file_name(&bucket.name, &mut claimed_names);
            match self
                .export_folder(bucket, &file_name, &output_dir, &mut summary)
                .await?
            {
                FolderOutcome::Completed => {}
                FolderOutcome::Interrupted => {
                    summary.interrupted = true;
                    break;
                }
            }
        }

        if summary.interrupted {
            tracing::warn!(
                attempted = summary.attempted,
                "Export interrupted by shutdown signal"
            );
        }

        if self.config.export.verify_output && !summary.files.is_empty() {
            let report = verify_chunk_files(&summary.files).await;
            summary.set_verification_report(report);
        }

        summary = summary.with_duration(start_time.elapsed());
        log_export_complete!(summary.succeeded, summary.failed, summary.duration);
        summary.log_summary();

        Ok(summary)
    }

    /// Exports one folder and records its written files in the summary
    async fn export_folder(
        &self,
        bucket: &FolderBucket,
        file_name: &str,
        output_dir: &Path,
        summary: &mut ExportSummary,
    ) -> Result<FolderOutcome> {
        log_folder_start!(bucket.name, bucket.len());

        let total = bucket.len();
        let mut writer =
            ChunkedDocumentWriter::new(output_dir, file_name, self.config.export.chunk_size);
        let mut folder_succeeded = 0usize;
        let mut outcome = FolderOutcome::Completed;

        for (index, note_id) in bucket.note_ids.iter().enumerate() {
            if self.shutdown_requested() {
                outcome = FolderOutcome::Interrupted;
                break;
            }

            self.recheck_credentials(summary.attempted).await?;
            summary.attempted += 1;

            match self.export_note(note_id, summary).await {
                Ok(note) => {
                    writer.append(note);
                    folder_succeeded += 1;
                    summary.succeeded += 1;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    let context = format!("folder={}, note_id={note_id}", bucket.name);
                    log_error_with_context!(&e, context);
                    summary.failed += 1;
                    summary.add_error(ExportError::from(&e).with_context(context));
                }
            }

            self.reporter.report(&ProgressEvent::note(
                index + 1,
                total,
                &bucket.name,
                folder_succeeded,
                summary.failed,
            ));

            writer.maybe_flush(total - index - 1)?;
        }

        summary.files.extend(writer.finalize()?);

        tracing::info!(
            folder = %bucket.name,
            succeeded = folder_succeeded,
            total,
            "Folder export finished"
        );

        Ok(outcome)
    }

    /// Fetches, resolves and translates one note
    async fn export_note(
        &self,
        note_id: &NoteId,
        summary: &mut ExportSummary,
    ) -> Result<ExportNote> {
        let entry = self.client.fetch_note(note_id).await?;
        let resolved = self.resolver.resolve(note_id, &entry.content).await?;

        summary.resources_embedded += resolved.resources.len();
        summary.resources_failed += resolved.failed;

        Ok(ExportNote {
            id: entry.id.clone(),
            title: entry.title(),
            created: format_timestamp(entry.create_date),
            updated: format_timestamp(entry.modify_date),
            body: self.translator.translate(&resolved.content),
            resources: resolved.resources,
        })
    }

    /// Probes the session when `processed` is a positive multiple of the
    /// configured interval
    async fn recheck_credentials(&self, processed: usize) -> Result<()> {
        let interval = self.config.export.credential_check_interval.max(1);
        if processed == 0 || processed % interval != 0 {
            return Ok(());
        }

        tracing::info!(processed, "Re-checking session cookies");
        match self.client.probe().await {
            Ok(()) => Ok(()),
            Err(e @ MinoteError::Credential(_)) => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Credential re-check failed, continuing");
                Ok(())
            }
        }
    }

    fn shutdown_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::minote::{Transport, TransportResponse};
    use crate::domain::TransportError;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use url::Url;

    const LISTING: &str = r#"{"data":{"entries":[
        {"id":"1","folderId":"0","createDate":1609459200000,"modifyDate":1609459200000,"extraInfo":"{\"title\":\"One\"}"},
        {"id":"2","folderId":"0","createDate":1609459200000,"modifyDate":1609459200000},
        {"id":"3","folderId":"0","createDate":1609459200000,"modifyDate":1609459200000}
    ],"folders":[],"syncTag":"c1"}}"#;
    const EMPTY_PAGE: &str = r#"{"data":{"entries":[],"folders":[],"syncTag":"c2"}}"#;

    /// One folder with notes 1..=3; note 2 fails with 500. Probes after the
    /// first answer `probe_status_after`.
    struct ServiceTransport {
        probes: AtomicUsize,
        probe_status_after: u16,
    }

    impl ServiceTransport {
        fn new(probe_status_after: u16) -> Self {
            Self {
                probes: AtomicUsize::new(0),
                probe_status_after,
            }
        }
    }

    fn json(body: &str) -> TransportResponse {
        TransportResponse {
            status: 200,
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn status(code: u16) -> TransportResponse {
        TransportResponse {
            status: code,
            ..Default::default()
        }
    }

    #[async_trait]
    impl Transport for ServiceTransport {
        async fn get(
            &self,
            url: &Url,
            params: &[(&str, &str)],
            _timeout: Duration,
        ) -> std::result::Result<TransportResponse, TransportError> {
            let path = url.path();
            if path.ends_with("note/full/page/") {
                if params.contains(&("limit", "1")) {
                    let seen = self.probes.fetch_add(1, Ordering::SeqCst);
                    return Ok(if seen == 0 {
                        status(200)
                    } else {
                        status(self.probe_status_after)
                    });
                }
                let page = if params.iter().any(|(k, _)| *k == "syncTag") {
                    EMPTY_PAGE
                } else {
                    LISTING
                };
                return Ok(json(page));
            }
            if path.ends_with("note/note/2/") {
                return Ok(status(500));
            }
            if let Some(id) = path
                .strip_prefix("/note/note/")
                .and_then(|rest| rest.strip_suffix('/'))
            {
                return Ok(json(&format!(
                    r#"{{"data":{{"entry":{{"id":"{id}","content":"<text>line {id}</text>\n","folderId":"0","createDate":0,"modifyDate":0}}}}}}"#
                )));
            }
            Ok(status(404))
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn report(&self, event: &ProgressEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn config(output_dir: &Path, check_interval: usize) -> MinoteConfig {
        let mut config = MinoteConfig::default();
        config.export.output_dir = output_dir.to_string_lossy().into_owned();
        config.export.chunk_size = 2;
        config.export.credential_check_interval = check_interval;
        config
    }

    fn coordinator(
        transport: ServiceTransport,
        config: MinoteConfig,
        shutdown: watch::Receiver<bool>,
    ) -> ExportCoordinator {
        let client = NoteServiceClient::new(
            Arc::new(transport),
            "https://i.mi.com/",
            Duration::from_secs(1),
            200,
        )
        .unwrap();
        ExportCoordinator::with_client(config, client, shutdown).unwrap()
    }

    #[tokio::test]
    async fn test_failed_note_is_counted_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let (_tx, rx) = watch::channel(false);
        let reporter = Arc::new(RecordingReporter::default());
        let coordinator = coordinator(ServiceTransport::new(200), config(dir.path(), 20), rx)
            .with_reporter(reporter.clone());

        let summary = coordinator.execute_export().await.unwrap();

        assert_eq!(summary.total_notes, 3);
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.notes_written(), 2);
        assert!(summary.verification_report.as_ref().unwrap().is_success());

        let events = reporter.events.lock().unwrap();
        let percentages: Vec<f64> = events.iter().map(|e| e.percentage).collect();
        assert_eq!(percentages, vec![0.0, 10.0, 30.0, 33.33, 66.67, 100.0, 100.0]);
        assert_eq!(events.last().unwrap().folder, "completed");
        assert_eq!(events[4].failed, 1);
        assert_eq!(events[5].successful, 2);
    }

    #[tokio::test]
    async fn test_recheck_rejection_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let (_tx, rx) = watch::channel(false);
        let reporter = Arc::new(RecordingReporter::default());
        let coordinator = coordinator(ServiceTransport::new(401), config(dir.path(), 1), rx)
            .with_reporter(reporter.clone());

        let err = coordinator.execute_export().await.unwrap_err();

        assert!(matches!(err, MinoteError::Credential(_)));
        assert_eq!(
            reporter.events.lock().unwrap().last().unwrap().folder,
            "failed"
        );
    }

    #[tokio::test]
    async fn test_shutdown_before_folders_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let coordinator = coordinator(ServiceTransport::new(200), config(dir.path(), 20), rx);

        let summary = coordinator.execute_export().await.unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.attempted, 0);
        assert!(summary.files.is_empty());
    }

    #[test]
    fn test_absolute_path() {
        let relative = absolute_path(Path::new("exported_notes")).unwrap();
        assert!(relative.is_absolute());
        assert!(relative.ends_with("exported_notes"));

        let absolute = absolute_path(Path::new("/tmp/notes")).unwrap();
        assert_eq!(absolute, PathBuf::from("/tmp/notes"));
    }
}
