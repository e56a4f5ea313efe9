//! Fast-path detection for near connections.
//!
//! Most topic pairs in a rich link graph are within two hops of each other.
//! Running the full bounded search first would burn the time budget on the
//! common case, so the cheap checks run up front: same topic, direct link,
//! then a shared neighbor.

use super::PathValidator;
use crate::cache::LinkCache;
use std::collections::HashSet;
use std::sync::Arc;

/// How many common neighbors to try before giving up on a 2-hop shortcut.
///
/// Cached data can be stale, so the first common neighbor is not guaranteed
/// to validate; a couple of spares cover that without turning the pre-check
/// into a search of its own.
const SHORTCUT_ATTEMPTS: usize = 3;

/// Finds 0, 1 and 2 hop connections before full search.
pub struct DirectConnectionFinder {
    cache: Arc<LinkCache>,
    validator: PathValidator,
}

impl DirectConnectionFinder {
    /// Creates a finder over the given cache.
    #[must_use]
    pub fn new(cache: Arc<LinkCache>) -> Self {
        let validator = PathValidator::new(Arc::clone(&cache));
        Self { cache, validator }
    }

    /// Returns a short validated path, or `None` if the topics are not
    /// within two hops.
    ///
    /// Checks in order, short-circuiting on the first success:
    ///
    /// 1. `start == end`
    /// 2. `end` is directly linked from `start`
    /// 3. `start` and `end` share a neighbor; the first
    ///    [`SHORTCUT_ATTEMPTS`] shared neighbors are tried through the
    ///    validator
    #[must_use]
    pub fn find_shortcut(&self, start: &str, end: &str) -> Option<Vec<String>> {
        if start == end {
            return Some(vec![start.to_string()]);
        }

        let start_references = self.cache.get_references(start);
        if start_references.iter().any(|reference| reference == end) {
            metrics::counter!("wikihop_shortcuts_total", "hops" => "1").increment(1);
            return Some(vec![start.to_string(), end.to_string()]);
        }

        let end_references: HashSet<String> =
            self.cache.get_references(end).into_iter().collect();
        let common = start_references
            .into_iter()
            .filter(|reference| end_references.contains(reference))
            .take(SHORTCUT_ATTEMPTS);

        for neighbor in common {
            // The shared neighbor came from cached data that may be stale,
            // so the candidate is verified before acceptance
            let candidate = vec![start.to_string(), neighbor, end.to_string()];
            if self.validator.is_valid(&candidate) {
                metrics::counter!("wikihop_shortcuts_total", "hops" => "2").increment(1);
                return Some(candidate);
            }
        }

        None
    }
}
