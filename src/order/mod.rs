//! Strategy selection and stack reordering.
//!
//! [`OrderStrategy`] picks one of the ordering strategies; each implements
//! [`Orderer`]. [`reorder_stack`] wires a strategy between an
//! [`ItemStore`] and an [`AlignmentEngine`](crate::pairwise::AlignmentEngine).

mod runner;
mod types;

pub use runner::{reorder_stack, OrderStrategy};
pub use types::{ItemStore, OrderOutcome, Orderer, TransformApply};
