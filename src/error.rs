//! Error taxonomy for ordering runs.

use thiserror::Error;

/// Failure reported by an alignment engine for a single comparison.
#[derive(Debug, Clone, Error)]
#[error("alignment failed: {reason}")]
pub struct AlignmentFailed {
    pub reason: String,
}

impl AlignmentFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Top-level error type for the ordering subsystem.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed indices, sizes or configuration values.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no items to order")]
    EmptyInput,

    #[error("at least {required} items are required, found {found}")]
    InsufficientItems { required: usize, found: usize },

    #[error("comparison of items {i} and {j} failed")]
    PairComparisonFailed {
        i: usize,
        j: usize,
        #[source]
        source: AlignmentFailed,
    },

    #[error("no transform available from item {i} to item {j}")]
    MissingTransform { i: usize, j: usize },

    #[error("worker pool error: {0}")]
    WorkerPool(String),

    #[error("item store failure: {0}")]
    Store(String),
}

/// Convenience type alias for results using [`OrderError`].
pub type Result<T> = std::result::Result<T, OrderError>;
