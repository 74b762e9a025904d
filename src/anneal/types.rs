//! Annealing moves, phases and results.

use crate::pairwise::CostTable;
use crate::tour::Tour;

/// Lifecycle of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnealPhase {
    Initializing,
    Cooling,
    /// A whole temperature level passed without an accepted move.
    Converged,
    /// The temperature level budget ran out.
    Exhausted,
}

/// A local move on a closed tour.
///
/// Positions satisfy `start < end`, and at least three tour positions lie
/// outside `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TourMove {
    /// Reverse the segment `start..=end` in place.
    Reverse { start: usize, end: usize },
    /// Move the segment `start..=end` to sit between the outside positions
    /// `after` and `after + 1` (cyclically), keeping its internal order.
    Transpose {
        start: usize,
        end: usize,
        after: usize,
    },
}

impl TourMove {
    /// Cost change the move would cause, from the boundary edges only.
    pub(crate) fn delta(&self, tour: &[usize], costs: &CostTable) -> f64 {
        let n = tour.len();
        let d = |p: usize, q: usize| costs.edge(tour[p], tour[q]);
        match *self {
            TourMove::Reverse { start, end } => {
                let before = (start + n - 1) % n;
                let next = (end + 1) % n;
                d(before, end) + d(next, start) - d(before, start) - d(next, end)
            }
            TourMove::Transpose { start, end, after } => {
                let before = (start + n - 1) % n;
                let next = (end + 1) % n;
                let after_next = (after + 1) % n;
                d(start, after) + d(end, after_next) + d(before, next)
                    - d(end, next)
                    - d(start, before)
                    - d(after, after_next)
            }
        }
    }

    /// Applies the move to `tour`. `scratch` is reused between calls.
    pub(crate) fn apply(&self, tour: &mut [usize], scratch: &mut Vec<usize>) {
        match *self {
            TourMove::Reverse { start, end } => tour[start..=end].reverse(),
            TourMove::Transpose { start, end, after } => {
                let n = tour.len();
                let before = (start + n - 1) % n;
                let next = (end + 1) % n;
                let after_next = (after + 1) % n;
                scratch.clear();
                // segment, then after_next..=before, then next..=after
                push_cyclic(scratch, tour, start, end);
                push_cyclic(scratch, tour, after_next, before);
                push_cyclic(scratch, tour, next, after);
                tour.copy_from_slice(scratch);
            }
        }
    }
}

fn push_cyclic(out: &mut Vec<usize>, tour: &[usize], from: usize, to: usize) {
    let n = tour.len();
    let len = (to + n - from) % n + 1;
    out.extend((0..len).map(|j| tour[(from + j) % n]));
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// The returned closed tour: the final state, or the best seen when
    /// `keep_best` is set.
    pub tour: Tour,

    /// Cost of `tour`, recomputed from the table.
    pub total_cost: f64,

    /// Cost of the starting tour.
    pub initial_cost: f64,

    /// Terminal phase: [`AnnealPhase::Converged`] or [`AnnealPhase::Exhausted`].
    pub phase: AnnealPhase,

    /// Number of temperature levels run.
    pub temperature_steps: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Trial moves evaluated.
    pub attempted_moves: usize,

    /// Moves accepted by the Metropolis rule (including improvements).
    pub accepted_moves: usize,

    /// Accepted moves with negative cost change.
    pub improving_moves: usize,

    /// Running tour cost at the end of each temperature level.
    pub cost_history: Vec<f64>,
}
