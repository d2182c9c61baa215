mod error;
mod transform;
mod types;

pub use error::RecordError;
pub use transform::{normalize_timestamp, transform};
pub use types::{SourceEvent, SourceUser, WriteItem};
