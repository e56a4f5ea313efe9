//! Three-tier cache for filtered reference lookups.
//!
//! Every neighbor expansion during a search goes through here, so lookup
//! cost dominates end-to-end latency. Resolution order per call:
//!
//! 1. **Recent tier**: bounded LRU of recent lookup results
//! 2. **Hot tier**: insertion-ordered in-process map with a coarse
//!    drop-oldest-half flush past its ceiling
//! 3. **Durable tier**: keyed [`ReferenceStore`], surviving restarts
//! 4. **Source**: one [`LinkSource`] call, at most once per lookup
//!
//! Source failures (not found, ambiguous, transport) resolve to an empty
//! reference list which is cached in the in-process tiers, so a known-bad
//! topic is not retried for the rest of the session. Durable-tier failures
//! are best-effort: they are counted and logged, never propagated, and a
//! search makes progress without persistence.
//!
//! # Thread Safety
//!
//! Safe for concurrent callers on different topics and for repeated or
//! concurrent callers on the same topic. Duplicate concurrent fetches of
//! the same miss are tolerated rather than deduplicated; the write with the
//! same key and value is idempotent.

use crate::models::CacheRecord;
use crate::source::LinkSource;
use crate::storage::ReferenceStore;
use crate::{current_timestamp, filter};
use lru::LruCache;
use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, RwLock};

/// Default ceiling for the hot tier.
const DEFAULT_HOT_CAPACITY: usize = 1000;

/// Default capacity for the recent-result LRU tier.
const DEFAULT_RECENT_CAPACITY: usize = 2000;

/// Hot tier state: the map plus its insertion order.
///
/// The order queue exists only for the size-triggered flush, which drops the
/// oldest half of the entries in one O(n) sweep. This is deliberately not
/// LRU-precise; reads do not touch the order.
#[derive(Debug, Default)]
struct HotTier {
    entries: HashMap<String, Vec<String>>,
    order: VecDeque<String>,
}

impl HotTier {
    fn get(&self, topic: &str) -> Option<Vec<String>> {
        self.entries.get(topic).cloned()
    }

    fn insert(&mut self, topic: String, references: Vec<String>, capacity: usize) {
        if self.entries.len() > capacity {
            self.flush_oldest_half();
        }
        if self.entries.insert(topic.clone(), references).is_none() {
            self.order.push_back(topic);
        }
    }

    fn flush_oldest_half(&mut self) {
        let drop_count = self.entries.len() / 2;
        let mut dropped = 0;
        while dropped < drop_count {
            let Some(topic) = self.order.pop_front() else {
                break;
            };
            if self.entries.remove(&topic).is_some() {
                dropped += 1;
            }
        }
        tracing::debug!(dropped, remaining = self.entries.len(), "Hot tier flushed");
        metrics::counter!("wikihop_hot_tier_flushes_total").increment(1);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Point-in-time view of cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries in the recent LRU tier.
    pub recent_entries: usize,
    /// Entries in the hot tier.
    pub hot_entries: usize,
    /// Records in the durable tier, if it could be counted.
    pub durable_records: Option<usize>,
}

/// Three-tier cache mapping a topic to its filtered outgoing references.
///
/// Repeated calls without intervening invalidation return the same value;
/// there is no expiry, because the upstream graph is not expected to change
/// within a session.
pub struct LinkCache {
    source: Arc<dyn LinkSource>,
    store: Arc<dyn ReferenceStore>,
    recent: RwLock<LruCache<String, Vec<String>>>,
    hot: Mutex<HotTier>,
    hot_capacity: usize,
}

impl LinkCache {
    /// Creates a cache with default tier capacities.
    #[must_use]
    pub fn new(source: Arc<dyn LinkSource>, store: Arc<dyn ReferenceStore>) -> Self {
        Self::with_capacities(source, store, DEFAULT_HOT_CAPACITY, DEFAULT_RECENT_CAPACITY)
    }

    /// Creates a cache with explicit tier capacities.
    ///
    /// # Panics
    ///
    /// Panics if `recent_capacity` is 0.
    #[must_use]
    #[allow(clippy::expect_used)] // Documented panic for invalid input
    pub fn with_capacities(
        source: Arc<dyn LinkSource>,
        store: Arc<dyn ReferenceStore>,
        hot_capacity: usize,
        recent_capacity: usize,
    ) -> Self {
        let cap = NonZeroUsize::new(recent_capacity).expect("recent_capacity must be > 0");
        Self {
            source,
            store,
            recent: RwLock::new(LruCache::new(cap)),
            hot: Mutex::new(HotTier::default()),
            hot_capacity,
        }
    }

    /// Returns the filtered outgoing references for a topic.
    ///
    /// Never fails: every error below this boundary resolves to an empty
    /// list, with the failure counted and logged. An empty result therefore
    /// means "no usable outgoing edges", whether because the page has none,
    /// does not exist, or could not be fetched.
    #[must_use]
    pub fn get_references(&self, topic: &str) -> Vec<String> {
        if topic.is_empty() {
            return Vec::new();
        }

        // Tier 1: recent results. Read lock plus peek, no recency promotion;
        // promotion happens on insert and the tier is coarse by design.
        if let Ok(recent) = self.recent.read() {
            if let Some(references) = recent.peek(topic) {
                metrics::counter!("wikihop_cache_hits_total", "tier" => "recent").increment(1);
                return references.clone();
            }
        }

        // Tier 2: hot map
        let hot_hit = {
            let hot = crate::storage::acquire_lock(&self.hot);
            hot.get(topic)
        };
        if let Some(references) = hot_hit {
            metrics::counter!("wikihop_cache_hits_total", "tier" => "hot").increment(1);
            self.remember_recent(topic, &references);
            return references;
        }

        // Tier 3: durable store
        match self.store.load(topic) {
            Ok(Some(record)) => {
                metrics::counter!("wikihop_cache_hits_total", "tier" => "durable").increment(1);
                // Re-apply the filter so records written under an older
                // marker table are cleaned on read
                let references = filter_references(topic, record.references);
                self.remember_in_process(topic, &references);
                return references;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(topic, error = %e, "Durable tier read failed");
                metrics::counter!("wikihop_store_read_failures_total").increment(1);
            }
        }

        metrics::counter!("wikihop_cache_misses_total").increment(1);
        self.fetch_and_cache(topic)
    }

    /// Returns current tier occupancy.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let recent_entries = self.recent.read().map(|recent| recent.len()).unwrap_or(0);
        let hot_entries = {
            let hot = crate::storage::acquire_lock(&self.hot);
            hot.len()
        };
        CacheStats {
            recent_entries,
            hot_entries,
            durable_records: self.store.count().ok(),
        }
    }

    /// Fetches a topic from the source, filters, and populates every tier.
    fn fetch_and_cache(&self, topic: &str) -> Vec<String> {
        let page = match self.source.resolve(topic) {
            Ok(Some(page)) => page,
            Ok(None) => {
                tracing::debug!(topic, source = self.source.name(), "Topic not found");
                metrics::counter!("wikihop_source_not_found_total").increment(1);
                // Cache the empty result in the in-process tiers only; a
                // missing page should not poison the durable cache across
                // restarts
                self.remember_in_process(topic, &[]);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(topic, source = self.source.name(), error = %e, "Source fetch failed");
                metrics::counter!("wikihop_source_failures_total").increment(1);
                self.remember_in_process(topic, &[]);
                return Vec::new();
            }
        };

        // Categories are connective tissue between otherwise distant
        // topics, so they ride along with the article links
        let mut raw = page.links;
        raw.extend(page.categories);
        let references = filter_references(topic, raw);

        let record = CacheRecord {
            topic: topic.to_string(),
            references: references.clone(),
            fetched_at: current_timestamp(),
        };
        if let Err(e) = self.store.save(&record) {
            // Best-effort write-through; search correctness never depends
            // on persistence succeeding
            tracing::warn!(topic, error = %e, "Durable tier write failed");
            metrics::counter!("wikihop_store_write_failures_total").increment(1);
        }

        self.remember_in_process(topic, &references);
        references
    }

    /// Stores a result in the hot and recent tiers.
    fn remember_in_process(&self, topic: &str, references: &[String]) {
        {
            let mut hot = crate::storage::acquire_lock(&self.hot);
            hot.insert(topic.to_string(), references.to_vec(), self.hot_capacity);
        }
        self.remember_recent(topic, references);
    }

    /// Stores a result in the recent LRU tier.
    fn remember_recent(&self, topic: &str, references: &[String]) {
        if let Ok(mut recent) = self.recent.write() {
            recent.put(topic.to_string(), references.to_vec());
        }
    }
}

/// Applies the content filter to a raw reference list, excluding the owning
/// topic itself.
fn filter_references(topic: &str, raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .filter(|reference| reference != topic && filter::is_content(reference))
        .collect()
}
