//! Data models for wikihop.
//!
//! Topics are plain `String` identifiers with exact-string equality, and
//! paths are ordered `Vec<String>` sequences. The only named record type is
//! the cache record persisted by the durable store.

use serde::{Deserialize, Serialize};

/// A cached reference lookup for one topic.
///
/// Records are created when a topic's outgoing references are first fetched
/// and are never mutated in place. A re-fetch writes a replacement record;
/// the upstream graph is not expected to change within a session, so records
/// carry no expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Canonical topic identifier.
    pub topic: String,
    /// Filtered outgoing references at the time of the fetch.
    ///
    /// Never contains `topic` itself and never contains administrative
    /// titles rejected by [`crate::filter::is_content`].
    pub references: Vec<String>,
    /// Unix timestamp (seconds) when the references were fetched.
    pub fetched_at: u64,
}

impl CacheRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(topic: impl Into<String>, references: Vec<String>) -> Self {
        Self {
            topic: topic.into(),
            references,
            fetched_at: crate::current_timestamp(),
        }
    }
}
