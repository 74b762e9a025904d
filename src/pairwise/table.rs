//! Dense pair tables and the cost-source abstraction consumed by the
//! ordering strategies.

use super::index::{slot, PairwiseIndex};
use super::transform::RigidTransform2D;
use super::types::Comparison;
use crate::error::{OrderError, Result};

/// Counters describing how a cost source was exercised during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostMetrics {
    /// Calls made to the alignment engine.
    pub comparisons: usize,
    /// Lookups answered from already computed pairs.
    pub cache_hits: usize,
    /// Failed comparisons replaced by a fallback cost.
    pub substituted: usize,
}

/// Pairwise costs (and transforms) as seen by an ordering strategy.
///
/// Sources may compute pairs lazily, hence `&mut self`.
pub trait CostSource {
    /// Number of items addressed by this source.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dissimilarity of the unordered pair `{i, j}`.
    fn cost(&mut self, i: usize, j: usize) -> Result<f64>;

    /// Transform mapping item `from` onto item `to`.
    ///
    /// # Errors
    /// [`OrderError::MissingTransform`] when the pair carries no transform.
    fn transform(&mut self, from: usize, to: usize) -> Result<RigidTransform2D>;

    /// Usage counters accumulated so far.
    fn metrics(&self) -> CostMetrics;
}

/// Complete, immutable table of pairwise comparisons.
///
/// Each slot holds the comparison of `lo` against `hi` (`lo < hi`), so a
/// stored transform maps `lo` onto `hi`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    index: PairwiseIndex,
    entries: Vec<Comparison>,
    metrics: CostMetrics,
}

impl CostTable {
    /// Builds a table from entries in slot order.
    pub fn from_entries(n: usize, entries: Vec<Comparison>) -> Result<Self> {
        let index = PairwiseIndex::new(n);
        if entries.len() != index.len() {
            return Err(OrderError::InvalidArgument(format!(
                "{n} items need {} pair entries, got {}",
                index.len(),
                entries.len()
            )));
        }
        Ok(Self {
            index,
            entries,
            metrics: CostMetrics::default(),
        })
    }

    /// Builds a table by evaluating `f(lo, hi)` for every pair.
    ///
    /// ```
    /// use u_stackorder::pairwise::{CostTable, Comparison};
    ///
    /// let table = CostTable::from_fn(3, |lo, hi| Comparison::cost_only((hi - lo) as f64));
    /// assert_eq!(table.lookup(2, 0).unwrap(), 2.0);
    /// ```
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Comparison,
    {
        let index = PairwiseIndex::new(n);
        let entries = index.pairs().map(|(lo, hi)| f(lo, hi)).collect();
        Self {
            index,
            entries,
            metrics: CostMetrics::default(),
        }
    }

    /// Builds a cost-only table from a symmetric square matrix.
    pub fn from_matrix(matrix: &[Vec<f64>]) -> Result<Self> {
        let n = matrix.len();
        if let Some(row) = matrix.iter().position(|row| row.len() != n) {
            return Err(OrderError::InvalidArgument(format!(
                "cost matrix row {row} does not have {n} columns"
            )));
        }
        Ok(Self::from_fn(n, |lo, hi| Comparison::cost_only(matrix[lo][hi])))
    }

    /// Copies every pair out of another cost source.
    pub fn collect_from<S: CostSource + ?Sized>(source: &mut S) -> Result<Self> {
        let index = PairwiseIndex::new(source.len());
        let mut entries = Vec::with_capacity(index.len());
        for (lo, hi) in index.pairs() {
            let cost = source.cost(lo, hi)?;
            let transform = match source.transform(lo, hi) {
                Ok(t) => Some(t),
                Err(OrderError::MissingTransform { .. }) => None,
                Err(e) => return Err(e),
            };
            entries.push(Comparison { cost, transform });
        }
        let mut table = Self::from_entries(index.items(), entries)?;
        table.metrics = source.metrics();
        Ok(table)
    }

    pub(crate) fn with_metrics(mut self, metrics: CostMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Number of items.
    pub fn items(&self) -> usize {
        self.index.items()
    }

    pub fn index(&self) -> PairwiseIndex {
        self.index
    }

    /// Stored comparisons in slot order.
    pub fn entries(&self) -> &[Comparison] {
        &self.entries
    }

    /// The stored comparison of `{i, j}`.
    pub fn get(&self, i: usize, j: usize) -> Result<&Comparison> {
        Ok(&self.entries[self.index.index(i, j)?])
    }

    /// Cost of `{i, j}`.
    pub fn lookup(&self, i: usize, j: usize) -> Result<f64> {
        self.get(i, j).map(|c| c.cost)
    }

    /// Transform mapping `from` onto `to`; the stored `lo → hi` transform is
    /// inverted when asked for `hi → lo`.
    pub fn transform_between(&self, from: usize, to: usize) -> Result<RigidTransform2D> {
        let stored = self
            .get(from, to)?
            .transform
            .ok_or(OrderError::MissingTransform { i: from, j: to })?;
        Ok(if from < to { stored } else { stored.inverse() })
    }

    /// Unchecked cost lookup for hot loops over validated tours.
    #[inline]
    pub(crate) fn edge(&self, i: usize, j: usize) -> f64 {
        self.entries[slot(i, j)].cost
    }
}

impl CostSource for CostTable {
    fn len(&self) -> usize {
        self.items()
    }

    fn cost(&mut self, i: usize, j: usize) -> Result<f64> {
        self.lookup(i, j)
    }

    fn transform(&mut self, from: usize, to: usize) -> Result<RigidTransform2D> {
        self.transform_between(from, to)
    }

    fn metrics(&self) -> CostMetrics {
        self.metrics
    }
}
