//! Greedy chaining result and growth state.

use crate::pairwise::CostMetrics;
use crate::tour::Tour;

/// Which end of a circular chain receives the next item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthDirection {
    Forward,
    Backward,
}

impl GrowthDirection {
    pub fn flip(self) -> Self {
        match self {
            GrowthDirection::Forward => GrowthDirection::Backward,
            GrowthDirection::Backward => GrowthDirection::Forward,
        }
    }
}

/// Result of a greedy chaining run.
#[derive(Debug, Clone)]
pub struct ChainResult {
    /// The visiting order. Closed for circular chains.
    pub tour: Tour,

    /// Sum of edge costs along the tour, closing edge included for cycles.
    pub total_cost: f64,

    /// The item the winning chain was grown from.
    pub seed: usize,

    /// Number of seeds tried.
    pub seeds_evaluated: usize,

    /// Cost source usage during the run.
    pub metrics: CostMetrics,
}
