//! Greedy chaining configuration.

use crate::error::{OrderError, Result};

/// Shape of the chain to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainClosure {
    /// A path with distinct first and last items.
    #[default]
    Open,
    /// A cycle grown from both ends of the seed.
    Circular,
}

/// Configuration for [`GreedyChainBuilder`](super::GreedyChainBuilder).
///
/// # Examples
///
/// ```
/// use u_stackorder::greedy::{ChainClosure, GreedyConfig};
///
/// let config = GreedyConfig::default()
///     .with_seed(3)
///     .with_closure(ChainClosure::Circular);
/// assert_eq!(config.seed, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreedyConfig {
    /// Item the chain starts from. `None` tries every item and keeps the
    /// cheapest chain.
    pub seed: Option<usize>,

    /// Open path or closed cycle.
    pub closure: ChainClosure,
}

impl GreedyConfig {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn circular() -> Self {
        Self::default().with_closure(ChainClosure::Circular)
    }

    pub fn with_seed(mut self, seed: usize) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_closure(mut self, closure: ChainClosure) -> Self {
        self.closure = closure;
        self
    }

    /// Validates the configuration against an item count.
    pub fn validate(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(OrderError::EmptyInput);
        }
        if self.closure == ChainClosure::Circular && n < 2 {
            return Err(OrderError::InsufficientItems {
                required: 2,
                found: n,
            });
        }
        if let Some(seed) = self.seed {
            if seed >= n {
                return Err(OrderError::InvalidArgument(format!(
                    "seed {seed} out of range for {n} items"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GreedyConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.closure, ChainClosure::Open);
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            GreedyConfig::open().validate(0),
            Err(OrderError::EmptyInput)
        ));
        assert!(GreedyConfig::open().validate(1).is_ok());
        assert!(matches!(
            GreedyConfig::circular().validate(1),
            Err(OrderError::InsufficientItems { required: 2, found: 1 })
        ));
        assert!(GreedyConfig::open().with_seed(4).validate(4).is_err());
    }
}
