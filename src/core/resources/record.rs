//! Building [`ResourceRecord`]s from downloaded bytes

use crate::domain::ResourceRecord;
use base64::{engine::general_purpose, Engine as _};
use md5::{Digest, Md5};

/// MD5 hex digest, the identity ENEX uses for `<en-media hash>`
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Md5::digest(bytes);
    format!("{digest:x}")
}

/// Hashes, measures and encodes an image payload
pub fn build_record(bytes: &[u8], mime: &str) -> ResourceRecord {
    let (width, height) = image_dimensions(bytes);
    ResourceRecord {
        hash: content_hash(bytes),
        mime: mime.to_string(),
        width,
        height,
        data: general_purpose::STANDARD.encode(bytes),
    }
}

/// Lowercased MIME type without parameters: `Image/PNG; q=1` -> `image/png`
pub fn normalize_mime(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(feature = "image-dimensions")]
fn image_dimensions(bytes: &[u8]) -> (u32, u32) {
    match imagesize::blob_size(bytes) {
        Ok(size) => (
            u32::try_from(size.width).unwrap_or(0),
            u32::try_from(size.height).unwrap_or(0),
        ),
        Err(e) => {
            tracing::debug!(error = %e, "Could not determine image dimensions");
            (0, 0)
        }
    }
}

#[cfg(not(feature = "image-dimensions"))]
fn image_dimensions(_bytes: &[u8]) -> (u32, u32) {
    (0, 0)
}
