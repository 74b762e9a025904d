//! Transform chain configuration.

use crate::error::{OrderError, Result};

/// Configuration for [`TransformChainBuilder`](super::TransformChainBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformChainConfig {
    /// Item the chain starts from, and whose frame all transforms map into.
    /// `None` tries every item and keeps the cheapest chain.
    pub seed: Option<usize>,
}

impl TransformChainConfig {
    pub fn with_seed(mut self, seed: usize) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration against an item count.
    pub fn validate(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(OrderError::EmptyInput);
        }
        match self.seed {
            Some(seed) if seed >= n => Err(OrderError::InvalidArgument(format!(
                "seed {seed} out of range for {n} items"
            ))),
            _ => Ok(()),
        }
    }
}
