mod backoff;
mod deadline;
mod driver;
mod error;
mod traits;
mod types;

pub use backoff::{BackoffPolicy, DEFAULT_BASE_DELAY, DEFAULT_SAFETY_MARGIN};
pub use deadline::{Deadline, RemainingTime};
pub use driver::{BatchWriteDriver, WriteSummary, MAX_BATCH_WRITE_ITEMS};
pub use error::{BackendError, WriteError};
pub use traits::BatchWriteBackend;
pub use types::{BatchRequest, UnprocessedSet};
