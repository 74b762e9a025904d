//! Annealing execution loop.
//!
//! # Algorithm
//!
//! 1. Start from the identity (or supplied) closed tour at `T = T_start`.
//! 2. At each temperature level, run up to `max_steps` trials:
//!    a. Draw a segment `start < end` leaving at least three positions
//!       outside it.
//!    b. Propose a reversal (probability `reverse_probability`) or a
//!       transposition of the segment behind a random outside position.
//!    c. Accept if the boundary-edge cost change is negative, otherwise with
//!       probability `exp(-Δ/T)`.
//!    d. End the level early once `max_accepted` moves were accepted.
//! 3. Multiply `T` by `cooling_factor`. Stop when a level accepted nothing
//!    (converged) or after `max_temperature_steps` levels (exhausted).
//!
//! # Reference
//!
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

use super::config::AnnealConfig;
use super::types::{AnnealPhase, AnnealResult, TourMove};
use crate::error::{OrderError, Result};
use crate::pairwise::CostTable;
use crate::random::rng_from_option;
use crate::tour::{validate_permutation, Tour, TourKind};
use rand::Rng;
use tracing::{debug, info};

/// Fewest items for which a segment with three outside positions exists.
pub const MIN_ITEMS: usize = 5;

/// Mutable search state of one run.
#[derive(Debug, Clone)]
struct AnnealingState {
    tour: Vec<usize>,
    cost: f64,
    temperature: f64,
    accepted: usize,
    phase: AnnealPhase,
}

/// Closed-tour simulated annealing over a complete cost table.
#[derive(Debug, Clone, Default)]
pub struct AnnealingTourSolver {
    config: AnnealConfig,
}

impl AnnealingTourSolver {
    pub fn new(config: AnnealConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Runs the solver.
    ///
    /// # Errors
    /// [`OrderError::InsufficientItems`] for fewer than [`MIN_ITEMS`] items,
    /// [`OrderError::InvalidArgument`] for an invalid configuration or
    /// starting tour.
    pub fn solve(&self, costs: &CostTable) -> Result<AnnealResult> {
        let config = &self.config;
        config.validate()?;

        let n = costs.items();
        if n < MIN_ITEMS {
            return Err(OrderError::InsufficientItems {
                required: MIN_ITEMS,
                found: n,
            });
        }

        let tour = match &config.initial_tour {
            Some(t) => {
                validate_permutation(t, n)?;
                t.clone()
            }
            None => (0..n).collect(),
        };
        let initial_cost = cycle_cost(&tour, costs);
        let mut state = AnnealingState {
            tour,
            cost: initial_cost,
            temperature: config.initial_temperature,
            accepted: 0,
            phase: AnnealPhase::Initializing,
        };

        let mut rng = rng_from_option(config.seed);
        let max_steps = config.max_steps_for(n);
        let max_accepted = config.max_accepted_for(n);

        let mut best_tour = state.tour.clone();
        let mut best_cost = state.cost;
        let mut scratch = Vec::with_capacity(n);
        let mut attempted_moves = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cost_history = Vec::with_capacity(config.max_temperature_steps);
        let mut levels = 0usize;

        state.phase = AnnealPhase::Cooling;
        while state.phase == AnnealPhase::Cooling {
            state.accepted = 0;

            for _ in 0..max_steps {
                let mv = self.propose(n, &mut rng);
                let delta = mv.delta(&state.tour, costs);
                attempted_moves += 1;

                // Metropolis
                if delta < 0.0 || (-delta / state.temperature).exp() > rng.random::<f64>() {
                    mv.apply(&mut state.tour, &mut scratch);
                    state.cost += delta;
                    state.accepted += 1;
                    if delta < 0.0 {
                        improving_moves += 1;
                    }
                    if config.keep_best && state.cost < best_cost {
                        best_cost = state.cost;
                        best_tour.copy_from_slice(&state.tour);
                    }
                }

                if state.accepted >= max_accepted {
                    break;
                }
            }

            levels += 1;
            accepted_moves += state.accepted;
            cost_history.push(state.cost);
            debug!(
                temperature = state.temperature,
                cost = state.cost,
                accepted = state.accepted,
                "temperature level"
            );

            state.temperature *= config.cooling_factor;
            if state.accepted == 0 {
                state.phase = AnnealPhase::Converged;
            } else if levels >= config.max_temperature_steps {
                state.phase = AnnealPhase::Exhausted;
            }
        }

        let order = if config.keep_best && best_cost < cycle_cost(&state.tour, costs) {
            best_tour
        } else {
            state.tour
        };
        let total_cost = cycle_cost(&order, costs);

        info!(
            items = n,
            phase = ?state.phase,
            levels,
            initial_cost,
            total_cost,
            accepted_moves,
            "annealing finished"
        );

        Ok(AnnealResult {
            tour: Tour::from_validated(order, TourKind::Closed),
            total_cost,
            initial_cost,
            phase: state.phase,
            temperature_steps: levels,
            final_temperature: state.temperature,
            attempted_moves,
            accepted_moves,
            improving_moves,
            cost_history,
        })
    }

    /// Draws a random move on a tour of `n >= MIN_ITEMS` positions.
    fn propose<R: Rng>(&self, n: usize, rng: &mut R) -> TourMove {
        let (start, end, outside) = loop {
            let mut a = rng.random_range(0..n);
            let mut b = rng.random_range(0..n - 1);
            if b >= a {
                b += 1;
            }
            if b < a {
                std::mem::swap(&mut a, &mut b);
            }
            let outside = n - (b - a + 1);
            if outside >= 3 {
                break (a, b, outside);
            }
        };

        if rng.random::<f64>() < self.config.reverse_probability {
            TourMove::Reverse { start, end }
        } else {
            let after = (end + 1 + rng.random_range(0..outside - 1)) % n;
            TourMove::Transpose { start, end, after }
        }
    }
}

/// Closed-tour cost of a validated order.
fn cycle_cost(order: &[usize], costs: &CostTable) -> f64 {
    let n = order.len();
    (0..n).map(|p| costs.edge(order[p], order[(p + 1) % n])).sum()
}
