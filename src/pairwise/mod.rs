//! Pairwise comparison storage.
//!
//! Every ordering strategy works from the costs of unordered item pairs.
//! This module provides:
//!
//! - [`PairwiseIndex`]: bijection between unordered pairs and triangular slots.
//! - [`RigidTransform2D`]: the rotation/translation/mirror aligning two items.
//! - [`AlignmentEngine`]: the external collaborator computing a comparison.
//! - [`CostTable`]: a complete, immutable table of comparisons.
//! - [`CostMatrixBuilder`]: eager (optionally parallel) and on-demand
//!   computation of comparisons.
//! - [`CostSource`]: the lookup interface strategies consume.

mod builder;
mod index;
mod table;
mod transform;
mod types;

pub use builder::{CostMatrixBuilder, CostMatrixConfig, FailurePolicy, OnDemandCosts};
pub use index::PairwiseIndex;
pub use table::{CostMetrics, CostSource, CostTable};
pub use transform::RigidTransform2D;
pub use types::{AlignmentEngine, CompareMode, Comparison};

#[cfg(test)]
pub(crate) use builder::tests::{line_items, LineEngine};
