//! Top-level search orchestration.
//!
//! The orchestrator is the only surface the caller sees: it sequences the
//! bounded search, re-validates whatever comes back, and falls through to a
//! category-overlap heuristic before conceding. "No path found" is an
//! expected, first-class outcome reported as an empty path, never an error.

use super::{HeuristicSearch, PathValidator, SearchLimits};
use crate::cache::LinkCache;
use crate::filter;
use crate::source::LinkSource;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Categories considered per endpoint in the fallback.
const FALLBACK_CATEGORIES_PER_SIDE: usize = 10;

/// Common categories tried before conceding.
const FALLBACK_ATTEMPTS: usize = 3;

/// Depth bound handed to the full search.
const SEARCH_MAX_DEPTH: usize = 6;

/// Entry point for path queries.
///
/// # Thread Safety
///
/// Safe to call from independent worker threads; all shared state lives in
/// the cache, which is mutually exclusive per tier.
pub struct SearchOrchestrator {
    cache: Arc<LinkCache>,
    source: Arc<dyn LinkSource>,
    validator: PathValidator,
    limits: SearchLimits,
}

impl SearchOrchestrator {
    /// Creates an orchestrator over the given cache and source.
    ///
    /// The source is consulted directly only by the category fallback; all
    /// reference lookups go through the cache.
    #[must_use]
    pub fn new(cache: Arc<LinkCache>, source: Arc<dyn LinkSource>) -> Self {
        let validator = PathValidator::new(Arc::clone(&cache));
        Self {
            cache,
            source,
            validator,
            limits: SearchLimits::default().with_max_depth(SEARCH_MAX_DEPTH),
        }
    }

    /// Overrides the search bounds used for every query.
    ///
    /// The per-call time budget passed to [`Self::find_path`] still takes
    /// precedence over the budget carried here.
    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Finds a short validated path between two topics.
    ///
    /// An empty result means no path was found within budget. That is not
    /// distinguishable from "the graph has no short connection", by design.
    #[must_use]
    pub fn find_path(&self, start: &str, end: &str, time_budget: Duration) -> Vec<String> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Vec::new();
        }

        let limits = self.limits.clone().with_time_budget(time_budget);
        let search = HeuristicSearch::new(Arc::clone(&self.cache), limits);

        if let Some(path) = search.search(start, end) {
            // The search already validated the path on the end hit; this
            // re-check is an independent safety net and stays cheap since
            // every edge is now cached
            if self.validator.is_valid(&path) {
                tracing::info!(start, end, hops = path.len() - 1, "Path found");
                return path;
            }
            tracing::warn!(start, end, "Search returned a path that failed re-validation");
        }

        if let Some(path) = self.category_fallback(start, end) {
            tracing::info!(start, end, via = %path[1], "Path found via common category");
            return path;
        }

        tracing::info!(start, end, "No path found within budget");
        Vec::new()
    }

    /// Tries to bridge the endpoints through a category both belong to.
    fn category_fallback(&self, start: &str, end: &str) -> Option<Vec<String>> {
        let start_categories = self.categories_of(start);
        if start_categories.is_empty() {
            return None;
        }
        let end_categories: HashSet<String> = self.categories_of(end).into_iter().collect();

        let common = start_categories
            .into_iter()
            .filter(|category| end_categories.contains(category))
            .take(FALLBACK_ATTEMPTS);

        for category in common {
            let candidate = vec![start.to_string(), category, end.to_string()];
            if self.validator.is_valid(&candidate) {
                metrics::counter!("wikihop_category_fallback_hits_total").increment(1);
                return Some(candidate);
            }
        }

        None
    }

    /// Fetches an endpoint's usable categories, capped per side.
    fn categories_of(&self, name: &str) -> Vec<String> {
        match self.source.resolve(name) {
            Ok(Some(page)) => {
                let mut categories: Vec<String> = page
                    .categories
                    .into_iter()
                    .filter(|category| filter::is_content(category))
                    .collect();
                categories.truncate(FALLBACK_CATEGORIES_PER_SIDE);
                categories
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(name, error = %e, "Category fetch failed");
                metrics::counter!("wikihop_source_failures_total").increment(1);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticLinkSource;
    use crate::storage::InMemoryReferenceStore;

    fn orchestrator_for(source: StaticLinkSource) -> SearchOrchestrator {
        let source = Arc::new(source);
        let cache = Arc::new(LinkCache::new(
            source.clone(),
            Arc::new(InMemoryReferenceStore::new()),
        ));
        SearchOrchestrator::new(cache, source)
    }

    fn budget() -> Duration {
        Duration::from_secs(5)
    }

    #[test]
    fn test_same_topic_is_single_node_path() {
        let orchestrator = orchestrator_for(StaticLinkSource::new());
        assert_eq!(
            orchestrator.find_path("X", "X", budget()),
            vec!["X".to_string()]
        );
    }

    #[test]
    fn test_empty_endpoints_rejected() {
        let orchestrator = orchestrator_for(StaticLinkSource::new());
        assert!(orchestrator.find_path("", "B", budget()).is_empty());
        assert!(orchestrator.find_path("A", "  ", budget()).is_empty());
    }

    #[test]
    fn test_chain_found_by_search() {
        let source = StaticLinkSource::new()
            .with_page("A", &["B"], &[])
            .with_page("B", &["C"], &[])
            .with_page("C", &[], &[]);
        let orchestrator = orchestrator_for(source);

        assert_eq!(
            orchestrator.find_path("A", "C", budget()),
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn test_dead_start_returns_empty() {
        let source = StaticLinkSource::new().with_page("A", &[], &[]);
        let orchestrator = orchestrator_for(source);

        assert!(orchestrator.find_path("A", "Z", budget()).is_empty());
    }

    /// Graph where the 2-hop shortcut burns all three of its attempts on
    /// shared neighbors that fail validation, leaving the category bridge
    /// as the only route.
    fn fallback_graph(jazz_links_back: bool) -> StaticLinkSource {
        let jazz_links: &[&str] = if jazz_links_back { &["Z"] } else { &["Other"] };
        StaticLinkSource::new()
            .with_page("A", &["N1", "N2", "N3"], &["Jazz"])
            .with_page("Z", &["N1", "N2", "N3"], &["Jazz"])
            .with_page("N1", &[], &[])
            .with_page("N2", &[], &[])
            .with_page("N3", &[], &[])
            .with_page("Jazz", jazz_links, &[])
    }

    #[test]
    fn test_category_fallback_bridges_endpoints() {
        let orchestrator = orchestrator_for(fallback_graph(true));

        // Zero budget: the shortcut attempts fail on N1..N3, the bounded
        // search aborts on its first time check, and the category bridge
        // is what remains
        assert_eq!(
            orchestrator.find_path("A", "Z", Duration::ZERO),
            vec!["A".to_string(), "Jazz".to_string(), "Z".to_string()]
        );
    }

    #[test]
    fn test_category_fallback_requires_real_edges() {
        // Shared category, but the category page does not link to Z, so
        // the bridge fails validation and the result is empty
        let orchestrator = orchestrator_for(fallback_graph(false));

        assert!(orchestrator.find_path("A", "Z", Duration::ZERO).is_empty());
    }

    #[test]
    fn test_zero_budget_never_hangs() {
        let source = StaticLinkSource::new()
            .with_page("A", &["B"], &[])
            .with_page("B", &["C"], &[])
            .with_page("C", &[], &[]);
        let orchestrator = orchestrator_for(source);

        // The search aborts on its first budget check; with no common
        // category either, the result is empty
        assert!(orchestrator.find_path("A", "C", Duration::ZERO).is_empty());
    }
}
