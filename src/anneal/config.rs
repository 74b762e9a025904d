//! Annealing configuration.

use crate::error::{OrderError, Result};

/// Configuration for [`AnnealingTourSolver`](super::AnnealingTourSolver).
///
/// Step and acceptance limits scale with the item count unless set
/// explicitly.
///
/// # Examples
///
/// ```
/// use u_stackorder::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(0.5)
///     .with_cooling_factor(0.95)
///     .with_max_temperature_steps(200)
///     .with_seed(42);
/// assert_eq!(config.max_steps_for(10), 1000);
/// assert_eq!(config.max_accepted_for(10), 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Starting temperature. Has to be high enough relative to typical cost
    /// differences for uphill moves to be accepted early on.
    pub initial_temperature: f64,

    /// Temperature multiplier applied after each level, in (0, 1).
    pub cooling_factor: f64,

    /// Maximum number of temperature levels.
    pub max_temperature_steps: usize,

    /// Trial moves per level. `None` means `100 * n`.
    pub max_steps: Option<usize>,

    /// Accepted moves after which a level ends early. `None` means `10 * n`.
    pub max_accepted: Option<usize>,

    /// Probability of proposing a segment reversal rather than a
    /// transposition.
    pub reverse_probability: f64,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Starting tour. `None` uses `[0, 1, ..., n-1]`.
    pub initial_tour: Option<Vec<usize>>,

    /// Return the cheapest tour seen instead of the final one.
    pub keep_best: bool,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 0.2,
            cooling_factor: 0.9,
            max_temperature_steps: 100,
            max_steps: None,
            max_accepted: None,
            reverse_probability: 0.5,
            seed: None,
            initial_tour: None,
            keep_best: false,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, f: f64) -> Self {
        self.cooling_factor = f;
        self
    }

    pub fn with_max_temperature_steps(mut self, n: usize) -> Self {
        self.max_temperature_steps = n;
        self
    }

    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = Some(n);
        self
    }

    pub fn with_max_accepted(mut self, n: usize) -> Self {
        self.max_accepted = Some(n);
        self
    }

    pub fn with_reverse_probability(mut self, p: f64) -> Self {
        self.reverse_probability = p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_initial_tour(mut self, tour: Vec<usize>) -> Self {
        self.initial_tour = Some(tour);
        self
    }

    pub fn with_keep_best(mut self, keep_best: bool) -> Self {
        self.keep_best = keep_best;
        self
    }

    /// Trial moves per level for `n` items.
    pub fn max_steps_for(&self, n: usize) -> usize {
        self.max_steps.unwrap_or(100 * n)
    }

    /// Early-stop acceptance count per level for `n` items.
    pub fn max_accepted_for(&self, n: usize) -> usize {
        self.max_accepted.unwrap_or(10 * n)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(OrderError::InvalidArgument(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(OrderError::InvalidArgument(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if self.max_temperature_steps == 0 {
            return Err(OrderError::InvalidArgument(
                "max_temperature_steps must be at least 1".into(),
            ));
        }
        if self.max_steps == Some(0) {
            return Err(OrderError::InvalidArgument(
                "max_steps must be positive or None".into(),
            ));
        }
        if self.max_accepted == Some(0) {
            return Err(OrderError::InvalidArgument(
                "max_accepted must be positive or None".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reverse_probability) {
            return Err(OrderError::InvalidArgument(format!(
                "reverse_probability must be in [0, 1], got {}",
                self.reverse_probability
            )));
        }
        Ok(())
    }
}
