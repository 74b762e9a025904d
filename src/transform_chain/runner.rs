//! Transform chain execution.

use super::config::TransformChainConfig;
use super::types::TransformChainResult;
use crate::error::Result;
use crate::greedy::{open_chain, search_seeds};
use crate::pairwise::{CostSource, RigidTransform2D};
use crate::tour::{Tour, TourKind};
use tracing::info;

/// Greedy open chain that also accumulates, per item, the composition of
/// the edge transforms leading to it from the seed.
///
/// For consecutive items `a → b` of the chain,
/// `cumulative[b] = T(a → b) ∘ cumulative[a]` with `cumulative[seed]` the
/// identity.
///
/// The cost source must carry transforms (e.g. built with
/// [`CompareMode::WithTransform`](crate::pairwise::CompareMode::WithTransform));
/// a chain edge without one fails with
/// [`OrderError::MissingTransform`](crate::OrderError::MissingTransform).
#[derive(Debug, Clone, Default)]
pub struct TransformChainBuilder {
    config: TransformChainConfig,
}

impl TransformChainBuilder {
    pub fn new(config: TransformChainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformChainConfig {
        &self.config
    }

    pub fn run<S: CostSource + ?Sized>(&self, costs: &mut S) -> Result<TransformChainResult> {
        let n = costs.len();
        self.config.validate(n)?;

        let best = search_seeds(costs, self.config.seed, open_chain::<S>)?;

        let mut transforms = vec![RigidTransform2D::identity(); n];
        for edge in best.order.windows(2) {
            let (from, to) = (edge[0], edge[1]);
            let step = costs.transform(from, to)?;
            transforms[to] = step.compose(&transforms[from]);
        }

        info!(
            items = n,
            seed = best.seed,
            total_cost = best.total_cost,
            seeds = best.seeds_evaluated,
            "transform chain built"
        );

        Ok(TransformChainResult {
            tour: Tour::from_validated(best.order, TourKind::Open),
            total_cost: best.total_cost,
            seed: best.seed,
            seeds_evaluated: best.seeds_evaluated,
            transforms,
            metrics: costs.metrics(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrderError;
    use crate::order::TransformApply;
    use crate::pairwise::{
        line_items, CompareMode, Comparison, CostMatrixBuilder, CostMatrixConfig, CostTable,
        LineEngine,
    };

    const TOL: f64 = 1e-9;

    #[test]
    fn test_seed_has_identity_and_first_edge_is_exact() {
        let t01 = RigidTransform2D::new(15.0, 1.0, -1.0, false);
        let t12 = RigidTransform2D::new(200.0, 0.5, 2.0, true);
        let mut table = CostTable::from_fn(3, |lo, hi| match (lo, hi) {
            (0, 1) => Comparison::with_transform(1.0, t01),
            (1, 2) => Comparison::with_transform(1.0, t12),
            _ => Comparison::with_transform(10.0, RigidTransform2D::identity()),
        });
        let result = TransformChainBuilder::new(TransformChainConfig::default().with_seed(0))
            .run(&mut table)
            .unwrap();

        assert_eq!(result.tour.order(), &[0, 1, 2]);
        assert!(result.transforms[0].approx_eq(&RigidTransform2D::identity(), TOL));
        assert!(result.transforms[1].approx_eq(&t01, TOL));
        assert!(result.transforms[2].approx_eq(&t12.compose(&t01), TOL));
    }

    #[test]
    fn test_reverse_edges_use_inverse() {
        let t01 = RigidTransform2D::new(90.0, 3.0, 0.0, false);
        let mut table = CostTable::from_fn(2, |_, _| Comparison::with_transform(1.0, t01));
        let result = TransformChainBuilder::new(TransformChainConfig::default().with_seed(1))
            .run(&mut table)
            .unwrap();
        assert_eq!(result.tour.order(), &[1, 0]);
        assert!(result.transforms[0].approx_eq(&t01.inverse(), TOL));
    }

    #[test]
    fn test_shifts_accumulate_along_chain() {
        let engine = LineEngine::new();
        let items = line_items(&[0.0, 1.0, 3.0, 6.0]);
        let builder = CostMatrixBuilder::new(&engine)
            .with_config(CostMatrixConfig::default().with_mode(CompareMode::WithTransform));
        let mut costs = builder.on_demand(&items).unwrap();
        let result = TransformChainBuilder::default().run(&mut costs).unwrap();

        // Every cumulative shift is the offset from the seed.
        let seed_x = items[result.seed].1;
        for (i, t) in result.transforms.iter().enumerate() {
            assert!((t.tx - (items[i].1 - seed_x)).abs() < TOL);
        }
    }

    #[test]
    fn test_missing_transform() {
        let mut table = CostTable::from_fn(3, |lo, hi| Comparison::cost_only((hi - lo) as f64));
        let err = TransformChainBuilder::default().run(&mut table).unwrap_err();
        assert!(matches!(err, OrderError::MissingTransform { .. }));
    }

    #[test]
    fn test_empty_input() {
        let mut table = CostTable::from_fn(0, |_, _| unreachable!());
        assert!(matches!(
            TransformChainBuilder::default().run(&mut table),
            Err(OrderError::EmptyInput)
        ));
    }

    struct ShiftX;

    impl TransformApply for ShiftX {
        type Item = f64;

        fn resample(&self, item: &f64, transform: &RigidTransform2D) -> f64 {
            transform.apply(*item, 0.0).0
        }
    }

    #[test]
    fn test_resample_all_maps_into_seed_frame() {
        let engine = LineEngine::new();
        let items = line_items(&[2.0, 5.0, 3.0]);
        let builder = CostMatrixBuilder::new(&engine)
            .with_config(CostMatrixConfig::default().with_mode(CompareMode::WithTransform));
        let mut costs = builder.on_demand(&items).unwrap();
        let result = TransformChainBuilder::new(TransformChainConfig::default().with_seed(0))
            .run(&mut costs)
            .unwrap();

        let xs: Vec<f64> = items.iter().map(|&(_, x)| x).collect();
        let out = result.resample_all(&xs, &ShiftX).unwrap();
        assert_eq!(out.len(), 3);
        for x in out {
            assert!((x - 2.0).abs() < TOL, "resampled to {x}, seed sits at 2.0");
        }
        let back = result.to_seed_frame(1).unwrap().apply(5.0, 0.0).0;
        assert!((back - 2.0).abs() < TOL);
        assert!(result.to_seed_frame(3).is_none());
    }

    #[test]
    fn test_resample_all_rejects_wrong_item_count() {
        let t = RigidTransform2D::new(0.0, 2.0, 0.0, false);
        let mut table = CostTable::from_fn(2, |_, _| Comparison::with_transform(1.0, t));
        let result = TransformChainBuilder::default().run(&mut table).unwrap();
        assert!(matches!(
            result.resample_all(&[5.0], &ShiftX),
            Err(OrderError::InvalidArgument(_))
        ));
    }
}
