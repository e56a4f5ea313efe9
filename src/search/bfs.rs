//! Heuristic bounded breadth-first search.
//!
//! The link graph is discovered lazily: nodes and edges are only known once
//! fetched, and a single hub page can carry hundreds of edges. Unbounded
//! BFS therefore degenerates fast. This search keeps classic FIFO layer
//! order but bounds everything that can run away: wall-clock time, total
//! dequeued nodes, path depth, and per-node fan-out (top candidates by
//! relevance score only).
//!
//! The result is deliberately not guaranteed shortest. The trade is bounded
//! latency and a high probability of finding *some* valid path.

use super::{DirectConnectionFinder, PathValidator, SearchLimits, score};
use crate::cache::LinkCache;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Instant;

/// A frontier entry: a topic and the path that reached it.
///
/// Owned exclusively by one in-flight search; never shared across
/// invocations.
struct SearchState {
    topic: String,
    path: Vec<String>,
}

/// Breadth-first search over the lazily expanded link graph.
pub struct HeuristicSearch {
    cache: Arc<LinkCache>,
    validator: PathValidator,
    direct: DirectConnectionFinder,
    limits: SearchLimits,
}

impl HeuristicSearch {
    /// Creates a search over the given cache with the given bounds.
    #[must_use]
    pub fn new(cache: Arc<LinkCache>, limits: SearchLimits) -> Self {
        let validator = PathValidator::new(Arc::clone(&cache));
        let direct = DirectConnectionFinder::new(Arc::clone(&cache));
        Self {
            cache,
            validator,
            direct,
            limits,
        }
    }

    /// Searches for a validated path from `start` to `end`.
    ///
    /// Returns `None` after frontier exhaustion, the node ceiling, or
    /// time-budget expiry; the three are indistinguishable to the caller,
    /// all meaning "no path within budget".
    #[must_use]
    pub fn search(&self, start: &str, end: &str) -> Option<Vec<String>> {
        let started = Instant::now();

        // Near connections are the common case; check them before paying
        // for a full expansion
        if let Some(path) = self.direct.find_shortcut(start, end) {
            return Some(path);
        }

        let target_words = score::tokenize(end);

        let mut frontier: VecDeque<SearchState> = VecDeque::new();
        frontier.push_back(SearchState {
            topic: start.to_string(),
            path: vec![start.to_string()],
        });
        // Visited is marked at enqueue time, not dequeue time, so a node
        // cannot be enqueued twice within one search
        let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
        let mut dequeued: usize = 0;

        let outcome = loop {
            if dequeued >= self.limits.node_ceiling {
                break "node_ceiling";
            }
            if started.elapsed() >= self.limits.time_budget {
                break "time_budget";
            }
            let Some(state) = frontier.pop_front() else {
                break "exhausted";
            };
            dequeued += 1;

            // Nodes at the depth bound are dequeued but not expanded
            if state.path.len() >= self.limits.max_depth {
                continue;
            }

            let neighbors = self.cache.get_references(&state.topic);

            let mut candidates: Vec<String> = Vec::new();
            for neighbor in neighbors {
                if neighbor == end {
                    let mut candidate = state.path.clone();
                    candidate.push(neighbor);
                    if self.validator.is_valid(&candidate) {
                        record_outcome("found", dequeued, started);
                        return Some(candidate);
                    }
                    // The cached edge was stale; keep searching instead of
                    // treating the miss as fatal
                    continue;
                }
                if !visited.contains(&neighbor) && neighbor.len() < self.limits.max_candidate_len {
                    candidates.push(neighbor);
                }
            }

            let kept = score::rank_candidates(candidates, &target_words, self.limits.branch_cap);
            for neighbor in kept {
                if visited.insert(neighbor.clone()) {
                    let mut path = state.path.clone();
                    path.push(neighbor.clone());
                    frontier.push_back(SearchState {
                        topic: neighbor,
                        path,
                    });
                }
            }
        };

        record_outcome(outcome, dequeued, started);
        None
    }
}

/// Records terminal metrics and a trace line for one search invocation.
fn record_outcome(outcome: &'static str, dequeued: usize, started: Instant) {
    let duration_ms = started.elapsed().as_millis();
    tracing::debug!(outcome, dequeued, duration_ms = %duration_ms, "Search finished");
    metrics::counter!("wikihop_search_outcomes_total", "outcome" => outcome).increment(1);
    #[allow(clippy::cast_precision_loss)]
    metrics::histogram!("wikihop_search_duration_ms").record(duration_ms as f64);
}
