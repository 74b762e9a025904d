//! Ordering capability and stack collaborators.

use crate::error::Result;
use crate::pairwise::{CostMetrics, CostSource, RigidTransform2D};
use crate::tour::Tour;

/// Outcome shared by every ordering strategy.
#[derive(Debug, Clone)]
pub struct OrderOutcome {
    /// The visiting order.
    pub tour: Tour,

    /// Cost of the tour (closing edge included for closed tours).
    pub total_cost: f64,

    /// Per-item transforms into a common frame, when the strategy
    /// produces them.
    pub transforms: Option<Vec<RigidTransform2D>>,

    /// Cost source usage during the run.
    pub metrics: CostMetrics,
}

/// A strategy turning pairwise costs into a visiting order.
pub trait Orderer {
    /// Short strategy name for logs.
    fn name(&self) -> &str;

    /// Orders all items addressed by `costs`.
    fn order<S: CostSource + ?Sized>(&self, costs: &mut S) -> Result<OrderOutcome>;
}

/// Index-addressed storage of the stack being reordered.
///
/// Index `i` must refer to the same logical item for the whole run.
pub trait ItemStore {
    type Item;

    /// Reads every item in stored order.
    fn read_all(&mut self) -> Result<Vec<Self::Item>>;

    /// Re-emits the stack so that position `k` holds item `order[k]`.
    ///
    /// When transforms are given, `transforms[i]` maps the first item of the
    /// chain onto item `i`; item `i` is brought into that first item's frame
    /// by resampling under `transforms[i].inverse()`.
    fn write_ordered(
        &mut self,
        order: &[usize],
        transforms: Option<&[RigidTransform2D]>,
    ) -> Result<()>;
}

/// Resamples an item under a rigid transform.
pub trait TransformApply {
    type Item;

    fn resample(&self, item: &Self::Item, transform: &RigidTransform2D) -> Self::Item;
}
