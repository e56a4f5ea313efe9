//! Pathfinding over the link graph.
//!
//! The search stack, bottom up: pure relevance scoring, path validation,
//! the near-connection fast path, the bounded breadth-first search, and the
//! orchestrator that sequences them and owns the fallback strategy.

mod bfs;
mod direct;
mod orchestrator;
pub mod score;
mod validator;

pub use bfs::HeuristicSearch;
pub use direct::DirectConnectionFinder;
pub use orchestrator::SearchOrchestrator;
pub use validator::PathValidator;

use std::time::Duration;

/// Resource bounds for one search invocation.
///
/// Every bound is checked at iteration boundaries; there is no external
/// cancellation token, and in-flight fetches are not interruptible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum path length before a node is no longer expanded.
    pub max_depth: usize,
    /// Wall-clock budget for the whole invocation.
    pub time_budget: Duration,
    /// Ceiling on dequeued nodes, independent of time, to bound memory and
    /// CPU even on a fast clock.
    pub node_ceiling: usize,
    /// Neighbors kept per expanded node after relevance ranking.
    pub branch_cap: usize,
    /// Candidate titles at or above this length are never enqueued.
    pub max_candidate_len: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: 6,
            time_budget: Duration::from_secs(15),
            node_ceiling: 5000,
            branch_cap: 10,
            max_candidate_len: 100,
        }
    }
}

impl SearchLimits {
    /// Sets the depth bound.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the wall-clock budget.
    #[must_use]
    pub const fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    /// Sets the dequeued-node ceiling.
    #[must_use]
    pub const fn with_node_ceiling(mut self, node_ceiling: usize) -> Self {
        self.node_ceiling = node_ceiling;
        self
    }

    /// Sets the per-node branch cap.
    #[must_use]
    pub const fn with_branch_cap(mut self, branch_cap: usize) -> Self {
        self.branch_cap = branch_cap;
        self
    }
}
