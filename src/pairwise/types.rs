//! Collaborator contract for pairwise comparison.

use super::transform::RigidTransform2D;
use crate::error::AlignmentFailed;

/// Whether a comparison must also estimate the aligning transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareMode {
    /// Only the dissimilarity is needed.
    #[default]
    CostOnly,
    /// The engine must also return the transform mapping the first item
    /// onto the second.
    WithTransform,
}

/// Outcome of comparing two items.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    /// Non-negative dissimilarity. Lower is more similar.
    pub cost: f64,
    /// Transform mapping the first compared item onto the second.
    pub transform: Option<RigidTransform2D>,
}

impl Comparison {
    pub fn cost_only(cost: f64) -> Self {
        Self {
            cost,
            transform: None,
        }
    }

    pub fn with_transform(cost: f64, transform: RigidTransform2D) -> Self {
        Self {
            cost,
            transform: Some(transform),
        }
    }

    /// Converts a correlation-style similarity (higher is better, at most 1)
    /// into a cost: `1 - similarity`, clamped at zero.
    pub fn from_similarity(similarity: f64, transform: Option<RigidTransform2D>) -> Self {
        Self {
            cost: (1.0 - similarity).max(0.0),
            transform,
        }
    }
}

/// Computes the dissimilarity of two items.
///
/// Implementations must be deterministic for a fixed pair and mode, or at
/// least cost-stable within one ordering run.
///
/// # Examples
///
/// ```
/// use u_stackorder::pairwise::{AlignmentEngine, CompareMode, Comparison};
/// use u_stackorder::AlignmentFailed;
///
/// struct Distance;
///
/// impl AlignmentEngine for Distance {
///     type Item = f64;
///
///     fn compare(&self, a: &f64, b: &f64, _mode: CompareMode) -> Result<Comparison, AlignmentFailed> {
///         Ok(Comparison::cost_only((a - b).abs()))
///     }
/// }
/// ```
pub trait AlignmentEngine: Send + Sync {
    /// The item type being compared.
    type Item: Sync;

    /// Compares `a` with `b`. When `mode` is [`CompareMode::WithTransform`]
    /// the returned transform maps `a` onto `b`.
    fn compare(
        &self,
        a: &Self::Item,
        b: &Self::Item,
        mode: CompareMode,
    ) -> Result<Comparison, AlignmentFailed>;
}
