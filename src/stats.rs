//! Statistics collected during a search.

use std::time::Duration;

/// Counters gathered over one `search` call.
///
/// Purely observational: the search is bounded by its iteration budget
/// alone, and the timing here is measurement, not a limit.
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Budget iterations performed.
    pub iterations: u32,
    /// Random rollouts played to a terminal state. Equal to `iterations`
    /// under incremental expansion; a multiple of it under threshold-gated
    /// expansion.
    pub rollouts: u64,
    /// Live nodes in the tree when the search finished.
    pub tree_size: usize,
    /// Deepest node reached by a tree walk.
    pub max_depth: usize,
    /// Wall-clock time of the search loop.
    pub total_time: Duration,
}

impl SearchStatistics {
    /// Rollouts per second over the whole search.
    pub fn rollouts_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.rollouts as f64 / self.total_time.as_secs_f64()
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} iterations, {} rollouts, {} nodes, max depth {}, {:.3}s ({:.0} rollouts/s)",
            self.iterations,
            self.rollouts,
            self.tree_size,
            self.max_depth,
            self.total_time.as_secs_f64(),
            self.rollouts_per_second()
        )
    }
}
