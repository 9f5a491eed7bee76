//! HTTP transport seam
//!
//! Everything the exporter sends upstream goes through [`Transport::get`].
//! The production implementation is [`HttpTransport`] (reqwest); tests swap
//! in an in-memory implementation.

use super::cookies::SessionCookies;
use crate::domain::TransportError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_VALUE: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE_VALUE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// A fully buffered HTTP response
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    pub status: u16,
    /// Header names are lowercase
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// First 200 characters of the body, for error messages
    pub fn body_snippet(&self) -> String {
        String::from_utf8_lossy(&self.body).chars().take(200).collect()
    }
}

/// Read-only session handle shared by every request and resource worker
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET with query parameters and a per-request timeout
    ///
    /// Non-success statuses are returned as responses, not errors; callers
    /// decide what a status means.
    async fn get(
        &self,
        url: &Url,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport carrying the session cookies
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a client that attaches the cookies and browser-like headers
    /// to every request
    pub fn new(cookies: &SessionCookies) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let mut cookie_value = HeaderValue::from_str(&cookies.header_value()).map_err(|_| {
            TransportError::ConnectionFailed(
                "session cookies contain characters not allowed in a header".to_string(),
            )
        })?;
        cookie_value.set_sensitive(true);
        headers.insert(COOKIE, cookie_value);

        let client = ClientBuilder::new()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TransportError::ConnectionFailed(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &Url,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        tracing::trace!(url = %url, "GET");

        let response = self
            .client
            .get(url.clone())
            .query(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(url, e))?
            .to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

fn map_reqwest_error(url: &Url, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(format!("{} ({err})", url.path()))
    } else {
        TransportError::ConnectionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_helpers() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "image/png".to_string());
        let response = TransportResponse {
            status: 204,
            headers,
            body: b"x".repeat(300),
        };

        assert!(response.is_success());
        assert_eq!(response.header("Content-Type"), Some("image/png"));
        assert_eq!(response.body_snippet().len(), 200);
    }

    #[test]
    fn test_non_success_statuses() {
        for status in [199, 301, 401, 500] {
            let response = TransportResponse {
                status,
                ..Default::default()
            };
            assert!(!response.is_success());
        }
    }

    #[test]
    fn test_http_transport_builds() {
        let cookies = SessionCookies::parse("userId=1; serviceToken=abc").unwrap();
        assert!(HttpTransport::new(&cookies).is_ok());
    }
}
