//! Pairwise cost computation, eager or on demand.

use super::index::PairwiseIndex;
use super::table::{CostMetrics, CostSource, CostTable};
use super::transform::RigidTransform2D;
use super::types::{AlignmentEngine, CompareMode, Comparison};
use crate::error::{AlignmentFailed, OrderError, Result};
use tracing::{debug, info};

/// What an on-demand source does when the engine fails for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Report [`OrderError::PairComparisonFailed`] to the caller.
    #[default]
    Propagate,
    /// Record the pair with this cost (and no transform) and continue.
    Substitute(f64),
}

/// Configuration for [`CostMatrixBuilder`].
///
/// # Examples
///
/// ```
/// use u_stackorder::pairwise::{CompareMode, CostMatrixConfig, FailurePolicy};
///
/// let config = CostMatrixConfig::default()
///     .with_mode(CompareMode::WithTransform)
///     .with_failure_policy(FailurePolicy::Substitute(1.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostMatrixConfig {
    /// Whether the engine is asked for transforms.
    pub mode: CompareMode,

    /// Dispatch eager comparisons on a worker pool (requires the
    /// `parallel` feature; ignored otherwise).
    pub parallel: bool,

    /// Upper bound on pool threads. `None` uses the rayon default.
    pub max_workers: Option<usize>,

    /// Failure handling for on-demand lookups. Eager builds always abort on
    /// the first failure.
    pub failure_policy: FailurePolicy,
}

impl Default for CostMatrixConfig {
    fn default() -> Self {
        Self {
            mode: CompareMode::CostOnly,
            parallel: false,
            max_workers: None,
            failure_policy: FailurePolicy::Propagate,
        }
    }
}

impl CostMatrixConfig {
    pub fn with_mode(mut self, mode: CompareMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_workers(mut self, n: usize) -> Self {
        self.max_workers = Some(n);
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == Some(0) {
            return Err(OrderError::InvalidArgument(
                "max_workers must be positive or None".into(),
            ));
        }
        if let FailurePolicy::Substitute(cost) = self.failure_policy {
            if !cost.is_finite() || cost < 0.0 {
                return Err(OrderError::InvalidArgument(format!(
                    "substitute cost must be finite and non-negative, got {cost}"
                )));
            }
        }
        Ok(())
    }
}

/// Runs the alignment engine over item pairs.
pub struct CostMatrixBuilder<'a, E: AlignmentEngine> {
    engine: &'a E,
    config: CostMatrixConfig,
}

impl<'a, E: AlignmentEngine> CostMatrixBuilder<'a, E> {
    pub fn new(engine: &'a E) -> Self {
        Self {
            engine,
            config: CostMatrixConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CostMatrixConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CostMatrixConfig {
        &self.config
    }

    /// Compares every unordered pair up front.
    ///
    /// The first failing pair aborts the build; no partial table is returned.
    pub fn build(&self, items: &[E::Item]) -> Result<CostTable> {
        self.config.validate()?;
        let index = PairwiseIndex::new(items.len());
        let entries = if self.config.parallel {
            self.compare_all_parallel(items, index)?
        } else {
            self.compare_all(items, index)?
        };

        info!(
            items = items.len(),
            pairs = entries.len(),
            mode = ?self.config.mode,
            "cost table built"
        );

        let metrics = CostMetrics {
            comparisons: entries.len(),
            ..CostMetrics::default()
        };
        Ok(CostTable::from_entries(items.len(), entries)?.with_metrics(metrics))
    }

    /// Returns a source that compares pairs on first use and caches them.
    pub fn on_demand(&self, items: &'a [E::Item]) -> Result<OnDemandCosts<'a, E>> {
        self.config.validate()?;
        Ok(OnDemandCosts::new(
            self.engine,
            items,
            self.config.mode,
            self.config.failure_policy,
        ))
    }

    fn compare_all(&self, items: &[E::Item], index: PairwiseIndex) -> Result<Vec<Comparison>> {
        index
            .pairs()
            .map(|(lo, hi)| compare_pair(self.engine, items, lo, hi, self.config.mode))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn compare_all_parallel(
        &self,
        items: &[E::Item],
        index: PairwiseIndex,
    ) -> Result<Vec<Comparison>> {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.max_workers.unwrap_or(0))
            .build()
            .map_err(|e| OrderError::WorkerPool(e.to_string()))?;
        let pairs: Vec<(usize, usize)> = index.pairs().collect();
        let engine = self.engine;
        let mode = self.config.mode;

        debug!(
            pairs = pairs.len(),
            workers = pool.current_num_threads(),
            "dispatching comparisons"
        );

        // Each pair lands in its own slot of the collected vector.
        pool.install(|| {
            pairs
                .par_iter()
                .map(|&(lo, hi)| compare_pair(engine, items, lo, hi, mode))
                .collect()
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn compare_all_parallel(
        &self,
        items: &[E::Item],
        index: PairwiseIndex,
    ) -> Result<Vec<Comparison>> {
        debug!("parallel feature disabled, comparing serially");
        self.compare_all(items, index)
    }
}

fn compare_pair<E: AlignmentEngine>(
    engine: &E,
    items: &[E::Item],
    lo: usize,
    hi: usize,
    mode: CompareMode,
) -> Result<Comparison> {
    let comparison = engine
        .compare(&items[lo], &items[hi], mode)
        .map_err(|source| OrderError::PairComparisonFailed {
            i: lo,
            j: hi,
            source,
        })?;
    if !comparison.cost.is_finite() || comparison.cost < 0.0 {
        return Err(OrderError::PairComparisonFailed {
            i: lo,
            j: hi,
            source: AlignmentFailed::new(format!("invalid cost {}", comparison.cost)),
        });
    }
    Ok(comparison)
}

/// Lazily filled cost source over a borrowed item slice.
pub struct OnDemandCosts<'a, E: AlignmentEngine> {
    engine: &'a E,
    items: &'a [E::Item],
    index: PairwiseIndex,
    mode: CompareMode,
    failure_policy: FailurePolicy,
    cache: Vec<Option<Comparison>>,
    metrics: CostMetrics,
}

impl<'a, E: AlignmentEngine> OnDemandCosts<'a, E> {
    fn new(
        engine: &'a E,
        items: &'a [E::Item],
        mode: CompareMode,
        failure_policy: FailurePolicy,
    ) -> Self {
        let index = PairwiseIndex::new(items.len());
        Self {
            engine,
            items,
            index,
            mode,
            failure_policy,
            cache: vec![None; index.len()],
            metrics: CostMetrics::default(),
        }
    }

    pub fn mode(&self) -> CompareMode {
        self.mode
    }

    fn fetch(&mut self, i: usize, j: usize) -> Result<Comparison> {
        let slot = self.index.index(i, j)?;
        if let Some(cached) = self.cache[slot] {
            self.metrics.cache_hits += 1;
            return Ok(cached);
        }

        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.metrics.comparisons += 1;
        let comparison = match compare_pair(self.engine, self.items, lo, hi, self.mode) {
            Ok(c) => c,
            Err(err) => match self.failure_policy {
                FailurePolicy::Propagate => return Err(err),
                FailurePolicy::Substitute(cost) => {
                    debug!(i = lo, j = hi, cost, error = %err, "substituting failed comparison");
                    self.metrics.substituted += 1;
                    Comparison::cost_only(cost)
                }
            },
        };
        self.cache[slot] = Some(comparison);
        Ok(comparison)
    }
}

impl<E: AlignmentEngine> CostSource for OnDemandCosts<'_, E> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn cost(&mut self, i: usize, j: usize) -> Result<f64> {
        self.fetch(i, j).map(|c| c.cost)
    }

    fn transform(&mut self, from: usize, to: usize) -> Result<RigidTransform2D> {
        let stored = self
            .fetch(from, to)?
            .transform
            .ok_or(OrderError::MissingTransform { i: from, j: to })?;
        Ok(if from < to { stored } else { stored.inverse() })
    }

    fn metrics(&self) -> CostMetrics {
        self.metrics
    }
}
