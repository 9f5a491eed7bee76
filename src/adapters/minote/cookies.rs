//! Session cookie parsing
//!
//! Users paste the `Cookie` header from a logged-in browser session. The
//! string is validated up front so malformed input fails before any request.

use crate::domain::{MinoteError, Result};
use zeroize::Zeroize;

/// Parsed `name=value` cookie pairs, zeroized on drop
#[derive(Clone)]
pub struct SessionCookies {
    pairs: Vec<(String, String)>,
}

impl Drop for SessionCookies {
    fn drop(&mut self) {
        for (name, value) in &mut self.pairs {
            name.zeroize();
            value.zeroize();
        }
    }
}

impl SessionCookies {
    /// Parses `name=value; name2=value2`
    ///
    /// Blank segments (a trailing `;`) are ignored. Values may themselves
    /// contain `=`; only the first one separates name from value.
    ///
    /// # Errors
    ///
    /// [`MinoteError::Validation`] when the string is empty, contains a
    /// control character, or a segment has no `=` or no name.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(MinoteError::Validation(
                "cookie string cannot be empty".to_string(),
            ));
        }

        // Control characters can't travel in a Cookie header
        if raw.chars().any(char::is_control) {
            return Err(MinoteError::Validation(
                "cookie string contains control characters".to_string(),
            ));
        }

        let mut pairs = Vec::new();
        for segment in raw.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let (name, value) = segment.split_once('=').ok_or_else(|| {
                MinoteError::Validation(format!(
                    "invalid cookie segment '{}': expected name=value",
                    redact(segment)
                ))
            })?;

            let name = name.trim();
            if name.is_empty() {
                return Err(MinoteError::Validation(
                    "invalid cookie segment: missing name before '='".to_string(),
                ));
            }

            pairs.push((name.to_string(), value.trim().to_string()));
        }

        Ok(Self { pairs })
    }

    /// Renders the pairs as a `Cookie` header value
    pub fn header_value(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(name, _)| name.as_str())
    }
}

impl std::fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookies")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

// Segments without '=' may still be a pasted token; keep only a prefix.
fn redact(segment: &str) -> String {
    let prefix: String = segment.chars().take(6).collect();
    if segment.chars().count() > 6 {
        format!("{prefix}…")
    } else {
        prefix
    }
}
