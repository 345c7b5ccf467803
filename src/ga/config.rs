//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop,
//! including the encoding [`Scheme`] and the search [`Interval`] the
//! runner builds its table from.

use crate::encoding::{BitString, EncodingTable, Interval};
use crate::error::{EncodingError, GaError};

use super::mode::Mode;

/// How codewords are laid out over the interval grid.
#[derive(Debug, Clone)]
pub enum Scheme {
    /// Ascending two's-complement count order.
    Binary,
    /// Reflected binary Gray sequence: adjacent grid points differ in one
    /// bit.
    Gray,
    /// An arbitrary precomputed permutation of all codewords, e.g. loaded
    /// through [`PermutationStore`](crate::encoding::PermutationStore).
    Custom {
        /// Layout name for run labels.
        name: String,
        /// One codeword per grid point, in grid order.
        codewords: Vec<BitString>,
    },
}

impl Scheme {
    /// Builds the encoding table for `interval`.
    pub fn build(&self, interval: Interval) -> Result<EncodingTable, EncodingError> {
        match self {
            Scheme::Binary => EncodingTable::binary(interval),
            Scheme::Gray => EncodingTable::gray(interval),
            Scheme::Custom { name, codewords } => {
                EncodingTable::from_codewords(name.clone(), interval, codewords.clone())
            }
        }
    }
}

/// Configuration for one GA run.
///
/// # Defaults
///
/// [`GaConfig::new`] starts from the Grefenstette (1986) parameters for the
/// De Jong test suite: mutation 0.01, crossover 0.95, population 30, and a
/// budget of 5000 evaluations under Gray encoding, minimizing.
///
/// # Builder Pattern
///
/// ```
/// use bitrep::encoding::Interval;
/// use bitrep::ga::{GaConfig, Mode, Scheme};
///
/// let interval = Interval::new(-5.12, 5.11, 0.01).unwrap();
/// let config = GaConfig::new(interval)
///     .with_scheme(Scheme::Binary)
///     .with_population_size(10)
///     .with_evaluation_budget(500)
///     .with_mode(Mode::Minimize)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Probability in `[0, 1]` that a child enters the per-bit mutation
    /// pass; also the per-bit flip probability inside that pass. The two
    /// stages are independent draws.
    pub mutation_rate: f64,

    /// Probability in `[0, 1]` of recombining a parent pair; otherwise the
    /// parents pass through unchanged.
    pub crossover_rate: f64,

    /// Number of individuals maintained per generation. Must be a positive
    /// even integer (reproduction works in pairs); elitist replacement may
    /// transiently grow one generation to `population_size + 1`.
    pub population_size: usize,

    /// Total number of budget-charged fitness evaluations before the run
    /// stops. Termination is by this budget, never by generation count.
    pub evaluation_budget: usize,

    /// Codeword layout.
    pub scheme: Scheme,

    /// Search grid for every input dimension.
    pub interval: Interval,

    /// Optimization direction.
    pub mode: Mode,

    /// Random seed for reproducibility; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl GaConfig {
    /// Creates a configuration with the Grefenstette defaults over the
    /// given interval.
    pub fn new(interval: Interval) -> Self {
        Self {
            mutation_rate: 0.01,
            crossover_rate: 0.95,
            population_size: 30,
            evaluation_budget: 5_000,
            scheme: Scheme::Gray,
            interval,
            mode: Mode::Minimize,
            seed: None,
        }
    }

    /// Sets the mutation rate (clamped to `[0, 1]`).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate (clamped to `[0, 1]`).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_evaluation_budget(mut self, budget: usize) -> Self {
        self.evaluation_budget = budget;
        self
    }

    /// Sets the encoding scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the optimization direction.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 || self.population_size % 2 != 0 {
            return Err(GaError::Configuration(format!(
                "population_size must be a positive even integer, got {}",
                self.population_size
            )));
        }
        if self.evaluation_budget == 0 {
            return Err(GaError::Configuration(
                "evaluation_budget must be at least 1".into(),
            ));
        }
        if self.mutation_rate == 0.0 && self.crossover_rate == 0.0 {
            return Err(GaError::Configuration(
                "with zero mutation and crossover rates no child can ever \
                 differ from its parents, so the evaluation budget is never consumed"
                    .into(),
            ));
        }
        Ok(())
    }
}
