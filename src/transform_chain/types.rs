//! Transform chain result.

use crate::error::{OrderError, Result};
use crate::order::TransformApply;
use crate::pairwise::{CostMetrics, RigidTransform2D};
use crate::tour::Tour;

/// Result of a transform chain run.
#[derive(Debug, Clone)]
pub struct TransformChainResult {
    /// The open visiting order.
    pub tour: Tour,

    /// Sum of edge costs along the path.
    pub total_cost: f64,

    /// First item of the chain; its transform is the identity.
    pub seed: usize,

    /// Number of seeds tried.
    pub seeds_evaluated: usize,

    /// Cumulative transform of each item, indexed by item. Entry `i` maps
    /// the seed onto item `i`.
    pub transforms: Vec<RigidTransform2D>,

    pub metrics: CostMetrics,
}

impl TransformChainResult {
    /// Transform taking `item` into the seed's frame, or `None` when `item`
    /// is out of range.
    pub fn to_seed_frame(&self, item: usize) -> Option<RigidTransform2D> {
        self.transforms.get(item).map(RigidTransform2D::inverse)
    }

    /// Resamples every item into the seed's frame, in tour order.
    ///
    /// # Errors
    /// [`OrderError::InvalidArgument`] when `items` does not hold exactly one
    /// entry per tour item.
    pub fn resample_all<A: TransformApply>(
        &self,
        items: &[A::Item],
        applier: &A,
    ) -> Result<Vec<A::Item>> {
        if items.len() != self.transforms.len() {
            return Err(OrderError::InvalidArgument(format!(
                "expected {} items, got {}",
                self.transforms.len(),
                items.len()
            )));
        }
        Ok(self
            .tour
            .order()
            .iter()
            .map(|&i| applier.resample(&items[i], &self.transforms[i].inverse()))
            .collect())
    }
}
