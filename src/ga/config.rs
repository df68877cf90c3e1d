//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::SelectionMechanism;
use crate::error::GaError;

/// Configuration for the Genetic Algorithm.
///
/// Controls chromosome shape, search domain, population size, operator
/// probabilities, run length, seeding, direction and selection.
///
/// # Defaults
///
/// ```
/// use u_evolution::ga::{GaConfig, SelectionMechanism};
///
/// let config = GaConfig::default();
/// assert_eq!(config.dims, 3);
/// assert_eq!(config.pop_size, 30);
/// assert_eq!(config.t_max, 50);
/// assert!(config.maximize);
/// assert_eq!(config.selection, SelectionMechanism::Proportional);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolution::ga::{GaConfig, SelectionMechanism};
///
/// let config = GaConfig::default()
///     .with_dims(2)
///     .with_domain(-5.0, 5.0)
///     .with_maximize(false)
///     .with_selection(SelectionMechanism::truncation(0.4).unwrap())
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of alleles per chromosome.
    pub dims: usize,

    /// Lower bound of the initialization domain.
    pub domain_lower: f64,

    /// Upper bound of the initialization domain.
    ///
    /// Mutation may push alleles outside `[domain_lower, domain_upper]`;
    /// the bounds only constrain the initial population.
    pub domain_upper: f64,

    /// Number of chromosomes per generation. Must be even.
    pub pop_size: usize,

    /// Probability of crossover for each parent pair (0.0–1.0).
    pub p_c: f64,

    /// Probability of mutating each allele (0.0–1.0).
    pub p_m: f64,

    /// Number of generations to run.
    pub t_max: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` derives one from the wall clock and logs it.
    pub rand_seed: Option<u64>,

    /// `true` to maximize the fitness function, `false` to minimize it.
    pub maximize: bool,

    /// Selection mechanism and its parameters.
    pub selection: SelectionMechanism,

    /// Whether to evaluate populations on the rayon pool.
    ///
    /// Only honoured with the `parallel` feature; otherwise evaluation is
    /// always sequential.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            dims: 3,
            domain_lower: -7.0,
            domain_upper: 4.0,
            pop_size: 30,
            p_c: 0.8,
            p_m: 0.1,
            t_max: 50,
            rand_seed: None,
            maximize: true,
            selection: SelectionMechanism::default(),
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the number of alleles per chromosome.
    pub fn with_dims(mut self, dims: usize) -> Self {
        self.dims = dims;
        self
    }

    /// Sets the initialization domain.
    pub fn with_domain(mut self, lower: f64, upper: f64) -> Self {
        self.domain_lower = lower;
        self.domain_upper = upper;
        self
    }

    /// Sets the population size.
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.p_c = p;
        self
    }

    /// Sets the per-allele mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.p_m = p;
        self
    }

    /// Sets the number of generations.
    pub fn with_t_max(mut self, n: usize) -> Self {
        self.t_max = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rand_seed = Some(seed);
        self
    }

    pub fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    /// Sets the selection mechanism.
    pub fn with_selection(mut self, selection: SelectionMechanism) -> Self {
        self.selection = selection;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Standard deviation scale for mutation: `(upper - lower) / 1000`.
    pub fn mutation_standard_deviation(&self) -> f64 {
        (self.domain_upper - self.domain_lower) / 1000.0
    }

    /// Validates the configuration.
    ///
    /// Unlike the builder methods, which store values as given, this is
    /// where every constraint is checked.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.dims == 0 {
            return Err(GaError::InvalidConfig("dims must be at least 1".into()));
        }
        if self.pop_size == 0 {
            return Err(GaError::InvalidConfig("pop_size must be at least 1".into()));
        }
        if self.pop_size % 2 != 0 {
            return Err(GaError::OddPopulationSize(self.pop_size));
        }
        if self.t_max == 0 {
            return Err(GaError::InvalidConfig("t_max must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.p_c) {
            return Err(GaError::InvalidConfig(format!(
                "p_c must be in [0, 1], got {}",
                self.p_c
            )));
        }
        if !(0.0..=1.0).contains(&self.p_m) {
            return Err(GaError::InvalidConfig(format!(
                "p_m must be in [0, 1], got {}",
                self.p_m
            )));
        }
        if !self.domain_lower.is_finite() || !self.domain_upper.is_finite() {
            return Err(GaError::InvalidConfig("domain bounds must be finite".into()));
        }
        if self.domain_lower >= self.domain_upper {
            return Err(GaError::InvalidConfig(format!(
                "domain_lower ({}) must be below domain_upper ({})",
                self.domain_lower, self.domain_upper
            )));
        }
        // The mutation noise deviation is the square of this scale.
        let scale = self.mutation_standard_deviation();
        if !(scale * scale).is_finite() {
            return Err(GaError::InvalidConfig(format!(
                "domain width {} is too large for the mutation scale",
                self.domain_upper - self.domain_lower
            )));
        }
        self.selection.validate()?;
        Ok(())
    }
}
