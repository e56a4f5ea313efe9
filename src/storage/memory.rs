//! In-memory reference store for testing.
//!
//! Non-persistent implementation of [`ReferenceStore`] with optional write
//! failure injection, used to verify that durable-tier failures stay
//! best-effort and never block a search.

use super::ReferenceStore;
use crate::models::CacheRecord;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory reference store for testing.
///
/// Uses `RwLock` for thread-safe access. Data is not persisted between runs.
#[derive(Debug, Default)]
pub struct InMemoryReferenceStore {
    records: RwLock<HashMap<String, CacheRecord>>,
    failing: AtomicBool,
}

impl InMemoryReferenceStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save and load fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    fn check_failing(&self, operation: &str) -> Result<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(Error::OperationFailed {
                operation: operation.to_string(),
                cause: "simulated store failure".to_string(),
            });
        }
        Ok(())
    }
}

impl ReferenceStore for InMemoryReferenceStore {
    fn load(&self, topic: &str) -> Result<Option<CacheRecord>> {
        self.check_failing("load_references")?;
        Ok(self
            .records
            .read()
            .ok()
            .and_then(|records| records.get(topic).cloned()))
    }

    fn save(&self, record: &CacheRecord) -> Result<()> {
        self.check_failing("save_references")?;
        if let Ok(mut records) = self.records.write() {
            records.insert(record.topic.clone(), record.clone());
        }
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        self.check_failing("count_references")?;
        Ok(self.records.read().map(|records| records.len()).unwrap_or(0))
    }
}
