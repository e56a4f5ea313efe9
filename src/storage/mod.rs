//! Durable storage for cached reference lookups.
//!
//! The durable tier is a single keyed table mapping a topic to its
//! serialized reference list. It survives process restarts and is expected
//! to grow without bound; there is no eviction.

mod connection;
mod memory;
mod sqlite;

pub use connection::{acquire_lock, configure_connection};
pub use memory::InMemoryReferenceStore;
pub use sqlite::SqliteReferenceStore;

use crate::Result;
use crate::models::CacheRecord;

/// Trait for durable reference stores.
///
/// # Implementor Notes
///
/// - Methods use `&self` to enable sharing via `Arc<dyn ReferenceStore>`;
///   use interior mutability (e.g., `Mutex<Connection>`) for mutable state.
/// - Stores must tolerate concurrent readers and writers from multiple
///   workers without corruption. Workers that want isolation should open
///   their own store handle against the same backing path.
/// - Writes with the same key and value are idempotent and safe to repeat;
///   no multi-key transactional guarantees are required.
pub trait ReferenceStore: Send + Sync {
    /// Loads the cached record for a topic.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored payload cannot be
    /// deserialized.
    fn load(&self, topic: &str) -> Result<Option<CacheRecord>>;

    /// Saves a record, replacing any existing record for the same topic.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&self, record: &CacheRecord) -> Result<()>;

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails.
    fn count(&self) -> Result<usize>;
}
