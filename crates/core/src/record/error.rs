use thiserror::Error;

/// Errors raised while decoding a single inbound record.
///
/// A record that fails here is malformed; it is never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record payload is not valid UTF-8: {0}")]
    InvalidEncoding(String),
    #[error("Record payload is not a valid source event: {0}")]
    InvalidJson(String),
    #[error("Invalid source timestamp: {0}")]
    InvalidTimestamp(String),
}
