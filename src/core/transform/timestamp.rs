//! ENEX timestamp formatting

use chrono::{DateTime, Utc};

/// Epoch values above this are milliseconds
const MILLIS_THRESHOLD: i64 = 10_000_000_000;

const ENEX_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Formats an epoch value (seconds or milliseconds) as `YYYYMMDDThhmmssZ` in UTC
///
/// Out-of-range values fall back to the current time.
///
/// ```
/// use minote::core::transform::format_timestamp;
///
/// assert_eq!(format_timestamp(1_700_000_000), "20231114T221320Z");
/// assert_eq!(format_timestamp(1_700_000_000_000), "20231114T221320Z");
/// ```
pub fn format_timestamp(epoch: i64) -> String {
    let parsed = if epoch > MILLIS_THRESHOLD {
        DateTime::<Utc>::from_timestamp_millis(epoch)
    } else {
        DateTime::<Utc>::from_timestamp(epoch, 0)
    };

    match parsed {
        Some(dt) => dt.format(ENEX_FORMAT).to_string(),
        None => {
            tracing::warn!(epoch, "Timestamp out of range, using current time");
            now()
        }
    }
}

/// Current time in ENEX format
pub fn now() -> String {
    Utc::now().format(ENEX_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_and_millis_agree() {
        assert_eq!(format_timestamp(1_609_459_200), "20210101T000000Z");
        assert_eq!(format_timestamp(1_609_459_200_000), "20210101T000000Z");
    }

    #[test]
    fn test_zero_is_epoch() {
        assert_eq!(format_timestamp(0), "19700101T000000Z");
    }

    #[test]
    fn test_out_of_range_falls_back() {
        let formatted = format_timestamp(i64::MAX);
        assert_eq!(formatted.len(), 16);
        assert!(formatted.ends_with('Z'));
    }
}
