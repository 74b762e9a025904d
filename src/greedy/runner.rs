//! Nearest-neighbor chain construction.
//!
//! # Algorithm
//!
//! **Open chain** from seed `s`: repeatedly append the unvisited item
//! closest to the last appended one (ties go to the lowest index); the final
//! unvisited item is appended without a search.
//!
//! **Circular chain** from seed `m`: a ring of `n + 1` slots starts with `m`
//! at both ends. Items are placed alternately at the next free slot after the
//! front and before the back, each time picking the unvisited item closest
//! to the neighbor of that slot. The last item fills the single remaining
//! slot, closing the ring.
//!
//! Without an explicit seed, every item is tried and the cheapest chain wins
//! (ties go to the lowest seed).

use super::config::{ChainClosure, GreedyConfig};
use super::types::{ChainResult, GrowthDirection};
use crate::error::{OrderError, Result};
use crate::pairwise::CostSource;
use crate::tour::{Tour, TourKind};
use tracing::{info, trace};

/// Builds visiting orders by greedy nearest-neighbor chaining.
///
/// ```
/// use u_stackorder::greedy::{GreedyChainBuilder, GreedyConfig};
/// use u_stackorder::pairwise::CostTable;
///
/// let mut costs = CostTable::from_matrix(&[
///     vec![0.0, 1.0, 5.0],
///     vec![1.0, 0.0, 1.0],
///     vec![5.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let result = GreedyChainBuilder::new(GreedyConfig::open().with_seed(0))
///     .run(&mut costs)
///     .unwrap();
/// assert_eq!(result.tour.order(), &[0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyChainBuilder {
    config: GreedyConfig,
}

impl GreedyChainBuilder {
    pub fn new(config: GreedyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GreedyConfig {
        &self.config
    }

    /// Builds the chain over all items of `costs`.
    pub fn run<S: CostSource + ?Sized>(&self, costs: &mut S) -> Result<ChainResult> {
        let n = costs.len();
        self.config.validate(n)?;

        let (kind, best) = match self.config.closure {
            ChainClosure::Open => (
                TourKind::Open,
                search_seeds(costs, self.config.seed, open_chain::<S>)?,
            ),
            ChainClosure::Circular => (
                TourKind::Closed,
                search_seeds(costs, self.config.seed, circular_chain::<S>)?,
            ),
        };

        info!(
            items = n,
            closure = ?self.config.closure,
            seed = best.seed,
            total_cost = best.total_cost,
            seeds = best.seeds_evaluated,
            "greedy chain built"
        );

        Ok(ChainResult {
            tour: Tour::from_validated(best.order, kind),
            total_cost: best.total_cost,
            seed: best.seed,
            seeds_evaluated: best.seeds_evaluated,
            metrics: costs.metrics(),
        })
    }
}

pub(crate) struct SeedSearch {
    pub order: Vec<usize>,
    pub total_cost: f64,
    pub seed: usize,
    pub seeds_evaluated: usize,
}

/// Grows a chain from `seed`, or from every item when `seed` is `None`,
/// keeping the cheapest.
pub(crate) fn search_seeds<S, F>(
    costs: &mut S,
    seed: Option<usize>,
    mut grow: F,
) -> Result<SeedSearch>
where
    S: CostSource + ?Sized,
    F: FnMut(&mut S, usize) -> Result<(Vec<usize>, f64)>,
{
    let candidates = match seed {
        Some(s) => s..s + 1,
        None => 0..costs.len(),
    };

    let mut best: Option<SeedSearch> = None;
    let mut evaluated = 0;
    for m in candidates {
        let (order, total_cost) = grow(&mut *costs, m)?;
        evaluated += 1;
        trace!(seed = m, total_cost, "candidate chain");
        if best.as_ref().is_none_or(|b| total_cost < b.total_cost) {
            best = Some(SeedSearch {
                order,
                total_cost,
                seed: m,
                seeds_evaluated: 0,
            });
        }
    }

    // validate() guarantees at least one candidate
    let mut best = best.ok_or(OrderError::EmptyInput)?;
    best.seeds_evaluated = evaluated;
    Ok(best)
}

/// Open nearest-neighbor path from `seed`. Returns the order and its cost.
pub(crate) fn open_chain<S: CostSource + ?Sized>(
    costs: &mut S,
    seed: usize,
) -> Result<(Vec<usize>, f64)> {
    let n = costs.len();
    let mut visited = vec![false; n];
    visited[seed] = true;
    let mut order = Vec::with_capacity(n);
    order.push(seed);

    let mut current = seed;
    let mut total = 0.0;
    while order.len() + 1 < n {
        let Some((next, cost)) = nearest_unvisited(costs, current, &visited)? else {
            break;
        };
        visited[next] = true;
        order.push(next);
        total += cost;
        current = next;
    }

    if let Some(last) = visited.iter().position(|&v| !v) {
        total += costs.cost(current, last)?;
        order.push(last);
    }
    Ok((order, total))
}

/// Closed chain grown alternately from both ends of `seed`.
pub(crate) fn circular_chain<S: CostSource + ?Sized>(
    costs: &mut S,
    seed: usize,
) -> Result<(Vec<usize>, f64)> {
    let n = costs.len();
    let mut visited = vec![false; n];
    visited[seed] = true;

    let mut ring = vec![seed; n + 1];
    // Free slots are front..=back.
    let mut front = 1;
    let mut back = n - 1;
    let mut direction = GrowthDirection::Forward;

    while back > front {
        let (slot, neighbor) = match direction {
            GrowthDirection::Forward => (front, ring[front - 1]),
            GrowthDirection::Backward => (back, ring[back + 1]),
        };
        let Some((next, _)) = nearest_unvisited(costs, neighbor, &visited)? else {
            break;
        };
        ring[slot] = next;
        visited[next] = true;
        match direction {
            GrowthDirection::Forward => front += 1,
            GrowthDirection::Backward => back -= 1,
        }
        direction = direction.flip();
    }

    if let Some(last) = visited.iter().position(|&v| !v) {
        ring[front] = last;
    }
    ring.truncate(n);

    let tour = Tour::from_validated(ring, TourKind::Closed);
    let total = tour.cost(costs)?;
    Ok((tour.into_order(), total))
}

/// Closest unvisited item to `from`, lowest index on ties.
fn nearest_unvisited<S: CostSource + ?Sized>(
    costs: &mut S,
    from: usize,
    visited: &[bool],
) -> Result<Option<(usize, f64)>> {
    let mut best: Option<(usize, f64)> = None;
    for (j, &seen) in visited.iter().enumerate() {
        if seen {
            continue;
        }
        let cost = costs.cost(from, j)?;
        if best.is_none_or(|(_, c)| cost < c) {
            best = Some((j, cost));
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::{line_items, CostMatrixBuilder, CostTable, LineEngine};
    use crate::tour::validate_permutation;
    use proptest::prelude::*;
    use std::sync::atomic::Ordering;

    /// cost(0,1)=1, cost(0,2)=5, cost(0,3)=9, cost(1,2)=1, cost(1,3)=5, cost(2,3)=1
    fn four_items() -> CostTable {
        CostTable::from_matrix(&[
            vec![0.0, 1.0, 5.0, 9.0],
            vec![1.0, 0.0, 1.0, 5.0],
            vec![5.0, 1.0, 0.0, 1.0],
            vec![9.0, 5.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    /// Cheapest Hamiltonian cycle by enumerating all orders starting at 0.
    fn brute_force_cycle(table: &CostTable) -> f64 {
        fn permute(rest: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
            if k == rest.len() {
                out.push(rest.clone());
                return;
            }
            for i in k..rest.len() {
                rest.swap(k, i);
                permute(rest, k + 1, out);
                rest.swap(k, i);
            }
        }
        let n = table.items();
        let mut rest: Vec<usize> = (1..n).collect();
        let mut all = Vec::new();
        permute(&mut rest, 0, &mut all);
        all.into_iter()
            .map(|tail| {
                let mut order = vec![0];
                order.extend(tail);
                let tour = Tour::new(order, TourKind::Closed).unwrap();
                tour.cost(&mut table.clone()).unwrap()
            })
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_open_chain_with_seed() {
        let mut table = four_items();
        let result = GreedyChainBuilder::new(GreedyConfig::open().with_seed(0))
            .run(&mut table)
            .unwrap();
        assert_eq!(result.tour.order(), &[0, 1, 2, 3]);
        assert_eq!(result.tour.kind(), TourKind::Open);
        assert!((result.total_cost - 3.0).abs() < 1e-12);
        assert_eq!(result.seeds_evaluated, 1);
    }

    #[test]
    fn test_open_chain_tie_breaks_by_lowest_index() {
        // From 0, items 2 and 3 are equally close.
        let mut table = CostTable::from_matrix(&[
            vec![0.0, 4.0, 1.0, 1.0],
            vec![4.0, 0.0, 2.0, 2.0],
            vec![1.0, 2.0, 0.0, 3.0],
            vec![1.0, 2.0, 3.0, 0.0],
        ])
        .unwrap();
        let result = GreedyChainBuilder::new(GreedyConfig::open().with_seed(0))
            .run(&mut table)
            .unwrap();
        assert_eq!(result.tour.order()[1], 2);
    }

    #[test]
    fn test_open_chain_searches_seeds() {
        let mut table = four_items();
        let result = GreedyChainBuilder::new(GreedyConfig::open())
            .run(&mut table)
            .unwrap();
        assert_eq!(result.seeds_evaluated, 4);
        // Seeds 0 and 3 both reach cost 3; the lower one wins.
        assert_eq!(result.seed, 0);
        assert!((result.total_cost - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_circular_chain_is_optimal_here() {
        let mut table = four_items();
        let result = GreedyChainBuilder::new(GreedyConfig::circular())
            .run(&mut table)
            .unwrap();
        assert_eq!(result.tour.kind(), TourKind::Closed);
        assert_eq!(result.tour.edges().count(), 4);
        assert!((result.total_cost - 12.0).abs() < 1e-12);
        assert!((result.total_cost - brute_force_cycle(&table)).abs() < 1e-12);
        assert!((result.tour.cost(&mut table).unwrap() - result.total_cost).abs() < 1e-12);
    }

    #[test]
    fn test_circular_growth_alternates() {
        // Points on a line: from seed 2 the front takes 1 (lowest of the tie
        // with 3), the back then takes 3, and so on.
        let xs = [0.0_f64, 1.0, 2.0, 3.0, 4.0];
        let mut table = CostTable::from_fn(5, |lo, hi| {
            crate::pairwise::Comparison::cost_only((xs[hi] - xs[lo]).abs())
        });
        let (order, total) = circular_chain(&mut table, 2).unwrap();
        assert_eq!(order, vec![2, 1, 0, 4, 3]);
        assert!((total - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_item_cycle() {
        let mut table = CostTable::from_matrix(&[vec![0.0, 2.0], vec![2.0, 0.0]]).unwrap();
        let result = GreedyChainBuilder::new(GreedyConfig::circular())
            .run(&mut table)
            .unwrap();
        assert_eq!(result.tour.order(), &[0, 1]);
        assert!((result.total_cost - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_errors() {
        let mut empty = CostTable::from_fn(0, |_, _| unreachable!());
        assert!(matches!(
            GreedyChainBuilder::default().run(&mut empty),
            Err(OrderError::EmptyInput)
        ));
        let mut single = CostTable::from_fn(1, |_, _| unreachable!());
        assert!(matches!(
            GreedyChainBuilder::new(GreedyConfig::circular()).run(&mut single),
            Err(OrderError::InsufficientItems { .. })
        ));
        let result = GreedyChainBuilder::default().run(&mut single).unwrap();
        assert_eq!(result.tour.order(), &[0]);
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_on_demand_source_memoizes_seed_search() {
        let engine = LineEngine::new();
        let items = line_items(&[0.0, 4.0, 1.0, 9.0, 2.5, 6.0]);
        let builder = CostMatrixBuilder::new(&engine);
        let mut costs = builder.on_demand(&items).unwrap();
        let result = GreedyChainBuilder::new(GreedyConfig::circular())
            .run(&mut costs)
            .unwrap();
        // Never more engine calls than distinct pairs.
        assert!(engine.calls.load(Ordering::SeqCst) <= 15);
        assert_eq!(result.metrics.comparisons, engine.calls.load(Ordering::SeqCst));
        assert!(result.metrics.cache_hits > 0);
    }

    proptest! {
        #[test]
        fn prop_chains_are_permutations(
            xs in proptest::collection::vec(-100.0f64..100.0, 2..12),
            circular in any::<bool>(),
        ) {
            let n = xs.len();
            let mut table = CostTable::from_fn(n, |lo, hi| {
                crate::pairwise::Comparison::cost_only((xs[hi] - xs[lo]).abs())
            });
            let config = if circular { GreedyConfig::circular() } else { GreedyConfig::open() };
            let result = GreedyChainBuilder::new(config).run(&mut table).unwrap();
            prop_assert!(validate_permutation(result.tour.order(), n).is_ok());
            let recomputed = result.tour.cost(&mut table).unwrap();
            prop_assert!((recomputed - result.total_cost).abs() < 1e-6);
        }
    }
}
