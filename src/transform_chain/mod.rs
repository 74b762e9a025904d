//! Greedy chaining with cumulative transform composition.
//!
//! Orders items like the open greedy chain and, along the way, composes the
//! pairwise aligning transforms so every item gets a single transform into
//! the seed's frame. Items can then be resampled once each instead of being
//! re-aligned against a common reference.

mod config;
mod runner;
mod types;

pub use config::TransformChainConfig;
pub use runner::TransformChainBuilder;
pub use types::TransformChainResult;
