//! # Wikihop
//!
//! Bounded-latency hyperlink pathfinding over the Wikipedia link graph.
//!
//! Wikihop finds a short chain of article links connecting two topics under a
//! hard wall-clock budget, and only ever returns chains that have been
//! re-verified edge by edge against the cached link data.
//!
//! ## Features
//!
//! - Heuristic bounded breadth-first search over a lazily fetched graph
//! - Three-tier link cache (recent LRU, bounded hot map, durable SQLite)
//! - Fast-path detection for 0, 1 and 2 hop connections
//! - Path validation so stale cache data never produces a fabricated answer
//!
//! ## Example
//!
//! ```rust,ignore
//! use wikihop::{LinkCache, SearchOrchestrator, MediaWikiClient, SqliteReferenceStore};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let source = Arc::new(MediaWikiClient::new());
//! let store = Arc::new(SqliteReferenceStore::new("pages.db")?);
//! let cache = Arc::new(LinkCache::new(source.clone(), store));
//! let finder = SearchOrchestrator::new(cache, source);
//!
//! let path = finder.find_path("Albert Einstein", "Kevin Bacon", Duration::from_secs(15));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cache;
pub mod config;
pub mod filter;
pub mod models;
pub mod observability;
pub mod search;
pub mod source;
pub mod storage;

// Re-exports for convenience
pub use cache::{CacheStats, LinkCache};
pub use config::{CacheConfig, SearchConfig, SourceConfig, WikihopConfig};
pub use models::CacheRecord;
pub use search::{
    DirectConnectionFinder, HeuristicSearch, PathValidator, SearchLimits, SearchOrchestrator,
};
pub use source::{LinkSource, MediaWikiClient, ResolvedPage, SourceHttpConfig, StaticLinkSource};
pub use storage::{InMemoryReferenceStore, ReferenceStore, SqliteReferenceStore};

/// Error type for wikihop operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty topic names, malformed configuration values |
/// | `OperationFailed` | HTTP transport errors, database open/read/write failures |
///
/// Note that "page not found" and "no path found" are NOT errors anywhere in
/// this crate. A missing page resolves to an empty reference list and a
/// missing path to an empty result, both first-class outcomes.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A topic name is empty
    /// - A configuration value cannot be parsed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The MediaWiki API request fails at the transport level
    /// - `SQLite` database operations fail
    /// - Configuration files cannot be read or parsed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for wikihop operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in seconds.
///
/// Centralized utility used for `fetched_at` stamps on cache records. Uses
/// `SystemTime::now()` with fallback to 0 if the system clock is before the
/// Unix epoch.
///
/// # Examples
///
/// ```rust
/// use wikihop::current_timestamp;
///
/// let ts = current_timestamp();
/// assert!(ts > 0);
/// ```
#[must_use]
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
