//! Strategy selection and the stack reordering pipeline.

use super::types::{ItemStore, OrderOutcome, Orderer};
use crate::anneal::{AnnealConfig, AnnealingTourSolver};
use crate::error::Result;
use crate::greedy::{GreedyChainBuilder, GreedyConfig};
use crate::pairwise::{
    AlignmentEngine, CompareMode, CostMatrixBuilder, CostMatrixConfig, CostSource, CostTable,
};
use crate::transform_chain::{TransformChainBuilder, TransformChainConfig};
use tracing::info;

impl Orderer for GreedyChainBuilder {
    fn name(&self) -> &str {
        "greedy"
    }

    fn order<S: CostSource + ?Sized>(&self, costs: &mut S) -> Result<OrderOutcome> {
        let result = self.run(costs)?;
        Ok(OrderOutcome {
            tour: result.tour,
            total_cost: result.total_cost,
            transforms: None,
            metrics: result.metrics,
        })
    }
}

impl Orderer for TransformChainBuilder {
    fn name(&self) -> &str {
        "transform-chain"
    }

    fn order<S: CostSource + ?Sized>(&self, costs: &mut S) -> Result<OrderOutcome> {
        let result = self.run(costs)?;
        Ok(OrderOutcome {
            tour: result.tour,
            total_cost: result.total_cost,
            transforms: Some(result.transforms),
            metrics: result.metrics,
        })
    }
}

impl Orderer for AnnealingTourSolver {
    fn name(&self) -> &str {
        "annealing"
    }

    /// Materializes the full table from `costs` before searching.
    fn order<S: CostSource + ?Sized>(&self, costs: &mut S) -> Result<OrderOutcome> {
        let table = CostTable::collect_from(costs)?;
        let result = self.solve(&table)?;
        Ok(OrderOutcome {
            tour: result.tour,
            total_cost: result.total_cost,
            transforms: None,
            metrics: costs.metrics(),
        })
    }
}

/// The ordering strategy to run.
///
/// # Examples
///
/// ```
/// use u_stackorder::order::{OrderStrategy, Orderer};
/// use u_stackorder::pairwise::CostTable;
///
/// let mut costs = CostTable::from_matrix(&[
///     vec![0.0, 1.0, 5.0, 9.0],
///     vec![1.0, 0.0, 1.0, 5.0],
///     vec![5.0, 1.0, 0.0, 1.0],
///     vec![9.0, 5.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let outcome = OrderStrategy::open_chain(Some(0)).order(&mut costs).unwrap();
/// assert_eq!(outcome.tour.order(), &[0, 1, 2, 3]);
/// assert_eq!(outcome.total_cost, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStrategy {
    /// Greedy nearest-neighbor chain, open or circular.
    Greedy(GreedyConfig),
    /// Greedy open chain with cumulative transforms.
    TransformChain(TransformChainConfig),
    /// Simulated annealing over a closed tour.
    Annealing(AnnealConfig),
}

impl Default for OrderStrategy {
    fn default() -> Self {
        OrderStrategy::Greedy(GreedyConfig::default())
    }
}

impl OrderStrategy {
    /// Open greedy chain from `seed`, or from the best seed when `None`.
    pub fn open_chain(seed: Option<usize>) -> Self {
        OrderStrategy::Greedy(GreedyConfig { seed, ..GreedyConfig::open() })
    }

    /// Circular greedy chain searched over all seeds.
    pub fn circular_chain() -> Self {
        OrderStrategy::Greedy(GreedyConfig::circular())
    }

    /// Comparison mode the strategy needs from the alignment engine.
    pub fn compare_mode(&self) -> CompareMode {
        match self {
            OrderStrategy::TransformChain(_) => CompareMode::WithTransform,
            _ => CompareMode::CostOnly,
        }
    }

    /// Whether the strategy revisits nearly every pair and so wants an
    /// eagerly built table.
    pub fn needs_full_table(&self) -> bool {
        matches!(self, OrderStrategy::Annealing(_))
    }

    /// Compares `items` with `engine` (eagerly or on demand, as the strategy
    /// prefers) and orders them.
    ///
    /// A strategy requiring transforms overrides the mode in `matrix`.
    pub fn run<E: AlignmentEngine>(
        &self,
        items: &[E::Item],
        engine: &E,
        matrix: &CostMatrixConfig,
    ) -> Result<OrderOutcome> {
        let mut matrix = matrix.clone();
        if self.compare_mode() == CompareMode::WithTransform {
            matrix.mode = CompareMode::WithTransform;
        }
        let builder = CostMatrixBuilder::new(engine).with_config(matrix);

        if self.needs_full_table() {
            let mut table = builder.build(items)?;
            self.order(&mut table)
        } else {
            let mut costs = builder.on_demand(items)?;
            self.order(&mut costs)
        }
    }
}

impl Orderer for OrderStrategy {
    fn name(&self) -> &str {
        match self {
            OrderStrategy::Greedy(_) => "greedy",
            OrderStrategy::TransformChain(_) => "transform-chain",
            OrderStrategy::Annealing(_) => "annealing",
        }
    }

    fn order<S: CostSource + ?Sized>(&self, costs: &mut S) -> Result<OrderOutcome> {
        match self {
            OrderStrategy::Greedy(config) => GreedyChainBuilder::new(config.clone()).order(costs),
            OrderStrategy::TransformChain(config) => {
                TransformChainBuilder::new(config.clone()).order(costs)
            }
            OrderStrategy::Annealing(config) => {
                AnnealingTourSolver::new(config.clone()).order(costs)
            }
        }
    }
}

/// Reads the whole stack, orders it and writes it back in the new order.
pub fn reorder_stack<St, E>(
    store: &mut St,
    engine: &E,
    strategy: &OrderStrategy,
    matrix: &CostMatrixConfig,
) -> Result<OrderOutcome>
where
    E: AlignmentEngine,
    St: ItemStore<Item = E::Item>,
{
    let items = store.read_all()?;
    let outcome = strategy.run(&items, engine, matrix)?;
    store.write_ordered(outcome.tour.order(), outcome.transforms.as_deref())?;

    info!(
        strategy = strategy.name(),
        items = items.len(),
        total_cost = outcome.total_cost,
        comparisons = outcome.metrics.comparisons,
        "stack reordered"
    );
    Ok(outcome)
}
