use serde::{Deserialize, Serialize};

/// Author of a source event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceUser {
    pub name: String,
}

/// A decoded stream event.
///
/// Only the fields needed to build a [`WriteItem`] are read; anything else in
/// the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceEvent {
    pub user: SourceUser,
    /// Creation time in the source format, e.g. `Mon Jan 01 12:00:00 +0000 2024`.
    pub created_at: String,
    pub text: String,
}

/// A normalized row ready for insertion into the event table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WriteItem {
    pub username: String,
    /// ISO-8601 instant in UTC, millisecond precision.
    pub timestamp: String,
    pub message: String,
}
