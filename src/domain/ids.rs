//! Domain identifier types
//!
//! Newtype wrappers for the note service's identifiers. The service is not
//! consistent about whether ids travel as JSON strings or numbers, so every
//! identifier here accepts both on deserialization and stores the textual form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire form of an identifier: `"123"` or `123`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Note identifier
///
/// # Examples
///
/// ```
/// use minote::domain::ids::NoteId;
/// use std::str::FromStr;
///
/// let id = NoteId::from_str("29563819123456").unwrap();
/// assert_eq!(id.as_str(), "29563819123456");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a new NoteId, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Note ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the note ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NoteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawId::deserialize(deserializer)?.into_string();
        NoteId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Folder identifier
///
/// Two folders exist on every account without being announced by the
/// listing endpoint: [`FolderId::uncategorized`] and [`FolderId::private`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FolderId(String);

impl FolderId {
    /// Creates a new FolderId, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Folder ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Folder `0`, holding notes filed nowhere else
    pub fn uncategorized() -> Self {
        Self("0".to_string())
    }

    /// Folder `2`, the private notes area
    pub fn private() -> Self {
        Self("2".to_string())
    }

    /// Returns the folder ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FolderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FolderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for FolderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawId::deserialize(deserializer)?.into_string();
        FolderId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Identifier of an embedded file (image) referenced from note markup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    /// Creates a new FileId; surrounding whitespace is dropped
    pub fn new(id: impl AsRef<str>) -> Result<Self, String> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err("File ID cannot be empty".to_string());
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
