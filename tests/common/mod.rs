//! In-memory notes service shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use minote::adapters::minote::{NoteServiceClient, Transport, TransportResponse};
use minote::domain::TransportError;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// PNG signature plus an IHDR chunk declaring the given size
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0, 0, 0, 0, 0]);
    bytes
}

/// Marker the service uses for an embedded image
pub fn placeholder(file_id: &str) -> String {
    format!("☺ {file_id}<0/><imgshow/>")
}

/// A listing entry in the service's wire format
pub fn entry(id: &str, folder_id: &str) -> Value {
    json!({
        "id": id,
        "folderId": folder_id,
        "createDate": 1_609_459_200_000_i64,
        "modifyDate": 1_609_459_200_000_i64,
    })
}

/// A listing page in the service's wire format
pub fn page(entries: Vec<Value>, folders: &[(&str, &str)], sync_tag: Option<&str>) -> Value {
    let folders: Vec<Value> = folders
        .iter()
        .map(|(id, subject)| json!({"id": id, "subject": subject}))
        .collect();
    json!({"data": {"entries": entries, "folders": folders, "syncTag": sync_tag}})
}

#[derive(Clone)]
struct Canned {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Canned {
    fn json(value: &Value) -> Self {
        Self {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: value.to_string().into_bytes(),
        }
    }

    fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    fn response(&self) -> TransportResponse {
        let mut headers = BTreeMap::new();
        if let Some(content_type) = &self.content_type {
            headers.insert("content-type".to_string(), content_type.clone());
        }
        TransportResponse {
            status: self.status,
            headers,
            body: self.body.clone(),
        }
    }
}

/// Scripted notes service
///
/// Listing pages are served in order; once exhausted, an empty page is
/// returned. Every request is logged as `path?key=value&...`.
pub struct FakeService {
    probe_statuses: Vec<u16>,
    pages: Vec<Canned>,
    notes: HashMap<String, Canned>,
    files: HashMap<String, Canned>,
    probes: AtomicUsize,
    listing_calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            probe_statuses: vec![200],
            pages: Vec::new(),
            notes: HashMap::new(),
            files: HashMap::new(),
            probes: AtomicUsize::new(0),
            listing_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Statuses for successive probes; the last one repeats
    pub fn with_probe_statuses(mut self, statuses: &[u16]) -> Self {
        self.probe_statuses = statuses.to_vec();
        self
    }

    pub fn with_page(mut self, page: Value) -> Self {
        self.pages.push(Canned::json(&page));
        self
    }

    /// Next listing page answers with a bare status
    pub fn with_page_status(mut self, status: u16) -> Self {
        self.pages.push(Canned::status(status));
        self
    }

    pub fn with_note(mut self, id: &str, folder_id: &str, title: &str, content: &str) -> Self {
        let extra_info = json!({"title": title}).to_string();
        let body = json!({"data": {"entry": {
            "id": id,
            "folderId": folder_id,
            "content": content,
            "createDate": 1_609_459_200_000_i64,
            "modifyDate": 1_609_545_600_000_i64,
            "extraInfo": extra_info,
        }}});
        self.notes.insert(id.to_string(), Canned::json(&body));
        self
    }

    pub fn with_note_status(mut self, id: &str, status: u16) -> Self {
        self.notes.insert(id.to_string(), Canned::status(status));
        self
    }

    pub fn with_image(mut self, file_id: &str, bytes: Vec<u8>, content_type: &str) -> Self {
        self.files.insert(
            file_id.to_string(),
            Canned {
                status: 200,
                content_type: Some(content_type.to_string()),
                body: bytes,
            },
        );
        self
    }

    pub fn with_file_status(mut self, file_id: &str, status: u16) -> Self {
        self.files.insert(file_id.to_string(), Canned::status(status));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests made to the listing endpoint, probes excluded
    pub fn listing_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.starts_with("/note/full/page/") && !r.ends_with("?limit=1"))
            .collect()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    fn probe(&self) -> Canned {
        let index = self.probes.fetch_add(1, Ordering::SeqCst);
        let status = self
            .probe_statuses
            .get(index)
            .or(self.probe_statuses.last())
            .copied()
            .unwrap_or(200);
        Canned::status(status)
    }

    fn listing(&self) -> Canned {
        let index = self.listing_calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(index) {
            Some(page) => page.clone(),
            None => Canned::json(&json!({"data": {"entries": [], "folders": []}})),
        }
    }
}

/// Client over a shared fake service
pub fn client(service: Arc<FakeService>) -> NoteServiceClient {
    NoteServiceClient::new(service, "https://i.mi.com/", Duration::from_secs(5), 200)
        .expect("valid base url")
}

#[async_trait]
impl Transport for FakeService {
    async fn get(
        &self,
        url: &Url,
        params: &[(&str, &str)],
        _timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let path = url.path().to_string();
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.requests
            .lock()
            .unwrap()
            .push(format!("{path}?{}", query.join("&")));

        let param = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        };

        let canned = if path == "/note/full/page/" {
            if param("limit").as_deref() == Some("1") {
                self.probe()
            } else {
                self.listing()
            }
        } else if let Some(id) = path
            .strip_prefix("/note/note/")
            .and_then(|rest| rest.strip_suffix('/'))
        {
            self.notes
                .get(id)
                .cloned()
                .unwrap_or_else(|| Canned::status(404))
        } else if path == "/file/full" {
            param("fileid")
                .and_then(|id| self.files.get(&id).cloned())
                .unwrap_or_else(|| Canned::status(404))
        } else {
            Canned::status(404)
        };

        Ok(canned.response())
    }
}
