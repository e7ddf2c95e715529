//! Lookahead search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one minimax decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, leaves included.
    pub nodes_evaluated: u64,

    /// Alpha-beta cutoffs taken.
    pub nodes_pruned: u64,

    /// Candidate actions whose simulation failed and were skipped.
    pub failed_simulations: u64,

    /// Set when a node or time budget stopped the search early.
    pub budget_exhausted: bool,

    /// Wall time spent searching (microseconds).
    pub elapsed_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.elapsed_us == 0 {
            0.0
        } else {
            self.nodes_evaluated as f64 / (self.elapsed_us as f64 / 1_000_000.0)
        }
    }
}
