//! Embedded resource model

/// An image fetched for one note, ready to be embedded in ENEX
///
/// Records are scoped to their note. Two notes embedding identical bytes
/// carry two records with equal hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// MD5 hex digest of the raw bytes
    pub hash: String,
    /// Normalized MIME type such as `image/png`
    pub mime: String,
    /// Pixel width, 0 when unknown
    pub width: u32,
    /// Pixel height, 0 when unknown
    pub height: u32,
    /// Standard base64 of the raw bytes
    pub data: String,
}

impl ResourceRecord {
    /// File name advertised in `<resource-attributes>`: `minote_{hash}.{subtype}`
    pub fn file_name(&self) -> String {
        let subtype = self
            .mime
            .split_once('/')
            .map(|(_, sub)| sub)
            .filter(|sub| !sub.is_empty())
            .unwrap_or("bin");
        format!("minote_{}.{}", self.hash, subtype)
    }

    /// The `<en-media>` reference substituted for the note's placeholder
    pub fn media_tag(&self) -> String {
        format!(
            r#"<div><en-media type="{}" hash="{}"/></div>"#,
            self.mime, self.hash
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mime: &str) -> ResourceRecord {
        ResourceRecord {
            hash: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            mime: mime.to_string(),
            width: 0,
            height: 0,
            data: String::new(),
        }
    }

    #[test]
    fn test_file_name_uses_subtype() {
        assert_eq!(
            record("image/jpeg").file_name(),
            "minote_d41d8cd98f00b204e9800998ecf8427e.jpeg"
        );
        assert_eq!(
            record("image/").file_name(),
            "minote_d41d8cd98f00b204e9800998ecf8427e.bin"
        );
    }

    #[test]
    fn test_media_tag() {
        assert_eq!(
            record("image/png").media_tag(),
            r#"<div><en-media type="image/png" hash="d41d8cd98f00b204e9800998ecf8427e"/></div>"#
        );
    }
}
