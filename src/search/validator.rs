//! Path validation against cached link data.
//!
//! Search heuristics can propose plausible-looking paths built from stale or
//! partially filtered data. Nothing leaves the engine without passing this
//! check: every consecutive pair in the path must be a real edge according
//! to the cache, fetching as needed.

use crate::cache::LinkCache;
use std::sync::Arc;

/// Validates that each step of a candidate path is a real link.
#[derive(Clone)]
pub struct PathValidator {
    cache: Arc<LinkCache>,
}

impl PathValidator {
    /// Creates a validator over the given cache.
    #[must_use]
    pub const fn new(cache: Arc<LinkCache>) -> Self {
        Self { cache }
    }

    /// Returns `true` if every consecutive pair in the path is an edge.
    ///
    /// Paths of length 0 or 1 are trivially valid. Fetch failures surface
    /// as empty reference lists, which invalidate the path: an
    /// unverifiable path is never reported as good.
    #[must_use]
    pub fn is_valid(&self, path: &[String]) -> bool {
        if path.len() < 2 {
            return true;
        }

        for pair in path.windows(2) {
            let references = self.cache.get_references(&pair[0]);
            if !references.contains(&pair[1]) {
                tracing::debug!(from = %pair[0], to = %pair[1], "Path step is not a real edge");
                metrics::counter!("wikihop_path_validation_failures_total").increment(1);
                return false;
            }
        }

        true
    }
}
