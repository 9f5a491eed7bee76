//! Typed client for the note service endpoints

use super::cookies::SessionCookies;
use super::models::{ApiEnvelope, ListingPage, NoteDetail};
use super::transport::{HttpTransport, Transport, TransportResponse};
use crate::config::{ExportConfig, ServiceConfig};
use crate::domain::{FileId, MinoteError, NoteEntry, NoteId, Result, TransportError};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const LISTING_PATH: &str = "note/full/page/";
const RESOURCE_PATH: &str = "file/full";

/// Client for the listing, note and resource endpoints
///
/// Status handling is uniform: 401 and 403 become
/// [`MinoteError::Credential`], any other non-2xx becomes
/// [`TransportError::Status`].
///
/// # Example
///
/// ```no_run
/// use minote::adapters::minote::NoteServiceClient;
/// use minote::config::MinoteConfig;
///
/// # async fn example() -> minote::domain::Result<()> {
/// let config = MinoteConfig::default();
/// let client = NoteServiceClient::from_config(&config.service, &config.export)?;
/// client.probe().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NoteServiceClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    timeout: Duration,
    page_size: usize,
}

impl NoteServiceClient {
    /// Creates a client over an existing transport
    ///
    /// # Errors
    ///
    /// [`MinoteError::Configuration`] if `base_url` is not a valid URL.
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: &str,
        timeout: Duration,
        page_size: usize,
    ) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| {
            MinoteError::Configuration(format!("Invalid service base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            transport,
            base_url,
            timeout,
            page_size,
        })
    }

    /// Validates the cookies and builds an HTTP-backed client
    ///
    /// # Errors
    ///
    /// [`MinoteError::Validation`] for a malformed cookie string; no request
    /// is made in that case.
    pub fn from_config(service: &ServiceConfig, export: &ExportConfig) -> Result<Self> {
        let cookies = SessionCookies::parse(service.cookies.expose_secret().as_ref())?;
        tracing::debug!(cookie_count = cookies.len(), "Session cookies parsed");

        let transport = HttpTransport::new(&cookies)?;
        Self::new(
            Arc::new(transport),
            &service.base_url,
            Duration::from_secs(service.timeout_seconds),
            export.page_size,
        )
    }

    /// Lightweight request confirming the session is still accepted
    pub async fn probe(&self) -> Result<()> {
        let url = self.endpoint(LISTING_PATH)?;
        let response = self
            .transport
            .get(&url, &[("limit", "1")], self.timeout)
            .await?;
        check_status(response, "credential probe")?;
        Ok(())
    }

    /// Fetches one listing page, continuing from `cursor` when given
    pub async fn fetch_page(&self, cursor: Option<&str>) -> Result<ListingPage> {
        let url = self.endpoint(LISTING_PATH)?;
        let limit = self.page_size.to_string();
        let mut params = vec![("limit", limit.as_str())];
        if let Some(cursor) = cursor {
            params.push(("syncTag", cursor));
        }

        let response = self.transport.get(&url, &params, self.timeout).await?;
        let response = check_status(response, "note listing")?;
        let envelope: ApiEnvelope<ListingPage> = decode(&response, "note listing")?;
        Ok(envelope.data)
    }

    /// Fetches a single note including its full markup
    pub async fn fetch_note(&self, id: &NoteId) -> Result<NoteEntry> {
        let url = self.endpoint(&format!("note/note/{id}/"))?;
        let response = self.transport.get(&url, &[], self.timeout).await?;
        let response = check_status(response, "note fetch")?;
        let envelope: ApiEnvelope<NoteDetail> = decode(&response, "note fetch")?;
        Ok(envelope.data.entry)
    }

    /// Fetches the raw bytes of an embedded image
    ///
    /// The content type is not checked here.
    pub async fn fetch_resource(&self, file_id: &FileId) -> Result<TransportResponse> {
        let url = self.endpoint(RESOURCE_PATH)?;
        let params = [("type", "note_img"), ("fileid", file_id.as_str())];
        let response = self.transport.get(&url, &params, self.timeout).await?;
        check_status(response, "resource fetch")
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            TransportError::InvalidUrl(format!("{}{path}: {e}", self.base_url)).into()
        })
    }
}

/// Maps auth failures to credential errors and other non-2xx to transport errors
fn check_status(response: TransportResponse, operation: &str) -> Result<TransportResponse> {
    match response.status {
        401 | 403 => Err(MinoteError::Credential(format!(
            "{operation} rejected with status {}: session cookies are invalid or expired",
            response.status
        ))),
        _ if response.is_success() => Ok(response),
        status => Err(TransportError::Status {
            status,
            message: format!("{operation} failed: {}", response.body_snippet()),
        }
        .into()),
    }
}

fn decode<T: DeserializeOwned>(response: &TransportResponse, operation: &str) -> Result<T> {
    serde_json::from_slice(&response.body).map_err(|e| {
        MinoteError::Format(format!("{operation} returned an unexpected payload: {e}"))
    })
}
