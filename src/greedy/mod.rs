//! Greedy nearest-neighbor chaining.
//!
//! Builds an open path or a closed cycle through all items by always moving
//! to the most similar unvisited item. Deterministic and much cheaper than a
//! full tour search, at the price of optimality.

mod config;
mod runner;
mod types;

pub use config::{ChainClosure, GreedyConfig};
pub use runner::GreedyChainBuilder;
pub use types::{ChainResult, GrowthDirection};

pub(crate) use runner::{open_chain, search_seeds};
