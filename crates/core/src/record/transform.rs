use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use super::error::RecordError;
use super::types::{SourceEvent, WriteItem};

/// Source timestamp layout, e.g. `Mon Jan 01 12:00:00 +0000 2024`.
///
/// The numeric offset sits between the time and the year, which generic
/// date parsers do not recognize as a zone without a `UTC` marker in front of
/// it. Spelling the layout out accepts it as-is.
const SOURCE_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Transforms one decoded record payload into a table row.
///
/// The payload is the raw record data after transport decoding. It must be
/// UTF-8 JSON describing a [`SourceEvent`].
pub fn transform(payload: &[u8]) -> Result<WriteItem, RecordError> {
    let text =
        std::str::from_utf8(payload).map_err(|e| RecordError::InvalidEncoding(e.to_string()))?;

    let event: SourceEvent =
        serde_json::from_str(text).map_err(|e| RecordError::InvalidJson(e.to_string()))?;

    tracing::debug!(
        user = %event.user.name,
        created_at = %event.created_at,
        "Decoded source event"
    );

    let timestamp = normalize_timestamp(&event.created_at)?;

    Ok(WriteItem {
        username: event.user.name,
        timestamp,
        message: event.text,
    })
}

/// Normalizes a source timestamp into an ISO-8601 UTC instant.
///
/// Accepts the stream's native layout and RFC 2822. Both carry an explicit
/// offset; a timestamp without one is rejected rather than guessed.
pub fn normalize_timestamp(raw: &str) -> Result<String, RecordError> {
    let raw = raw.trim();

    let parsed: DateTime<FixedOffset> = DateTime::parse_from_str(raw, SOURCE_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map_err(|_| RecordError::InvalidTimestamp(raw.to_string()))?;

    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}
