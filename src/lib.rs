//! Similarity-based ordering of item stacks.
//!
//! Reorders a stack of pairwise-comparable items (e.g. captured signal
//! frames) so that neighbors in the new order are as similar as possible,
//! using only an externally supplied pairwise cost.
//!
//! - **Pairwise costs** ([`pairwise`]): triangular pair indexing, cost tables
//!   built eagerly (optionally in parallel) or on demand, rigid 2D transforms.
//! - **Greedy chaining** ([`greedy`]): nearest-neighbor paths and cycles,
//!   with optional search over all seeds.
//! - **Transform chaining** ([`transform_chain`]): greedy paths that compose
//!   pairwise transforms into one transform per item.
//! - **Simulated annealing** ([`anneal`]): closed-tour search with segment
//!   reversal and transposition moves.
//! - **Strategy selection** ([`order`]): a tagged strategy enum and a
//!   read-order-write pipeline over an item store.
//!
//! # Architecture
//!
//! The alignment engine, the item store and the resampling routine are
//! collaborators supplied by the caller through traits. Everything here is
//! in-memory for the duration of one ordering run.

pub mod anneal;
pub mod error;
pub mod greedy;
pub mod order;
pub mod pairwise;
pub mod random;
pub mod tour;
pub mod transform_chain;

pub use error::{AlignmentFailed, OrderError, Result};
pub use tour::{Tour, TourKind};
