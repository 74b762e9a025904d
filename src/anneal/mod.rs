//! Simulated annealing over closed tours.
//!
//! Improves a tour with random segment reversals and transpositions under
//! the Metropolis acceptance rule and geometric cooling. Every move is
//! priced from the handful of edges it touches, so a complete
//! [`CostTable`](crate::pairwise::CostTable) is required up front.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lin (1965), segment reversal and transport moves for the TSP

mod config;
mod runner;
mod types;

pub use config::AnnealConfig;
pub use runner::{AnnealingTourSolver, MIN_ITEMS};
pub use types::{AnnealPhase, AnnealResult};
