//! Error types.
//!
//! Every failure in the engine is fatal to the run that raised it: there is
//! no retry or partial-failure path. Callers that want to re-prompt (an
//! interactive configuration layer, say) match on these values.

use thiserror::Error;

/// Errors raised by the GA orchestrator and its data model.
#[derive(Debug, Error, PartialEq)]
pub enum GaError {
    /// A configuration value violates its documented constraint.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Single-point crossover pairs consecutive members, so the population
    /// size must be even.
    #[error("population size must be even, got {0}")]
    OddPopulationSize(usize),

    /// `seed_random` was called on a GA that already holds a seed.
    #[error("random already seeded (seed {0})")]
    AlreadySeeded(u64),

    /// An operation needing randomness ran before `seed_random`.
    #[error("random not seeded")]
    NotSeeded,

    /// `initialize_population` was called while a population exists.
    #[error("population already initialized")]
    AlreadyInitialized,

    /// An operation needing a population ran before `initialize_population`.
    #[error("population not initialized")]
    NotInitialized,

    /// Population aggregates were queried before `evaluate`.
    #[error("population has not been evaluated")]
    NotEvaluated,

    /// Average fitness of a population without members.
    #[error("population is empty")]
    EmptyPopulation,

    /// A generation produced a population of the wrong size.
    #[error("population size mismatch: expected {expected}, got {actual}")]
    PopulationSize { expected: usize, actual: usize },

    #[error("selection failed: {0}")]
    Selection(#[from] SelectionError),
}

/// Errors raised while constructing or running a selection mechanism.
#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    /// A required mechanism parameter was not supplied.
    #[error("missing selection parameter `{0}`")]
    MissingParameter(&'static str),

    /// A mechanism parameter lies outside its documented range.
    #[error("selection parameter `{name}` must be in {range}, got {value}")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },

    /// Proportional selection needs a strictly positive fitness total.
    #[error("sum of fitnesses must be positive, got {0}")]
    NonPositiveFitnessSum(f64),

    /// Proportional selection cannot weight a negative fitness.
    #[error("fitness at index {index} is negative ({value})")]
    NegativeFitness { index: usize, value: f64 },

    /// Truncation kept no members: `floor(pop_size * tao)` is zero.
    #[error("truncation pool is empty (pop_size {pop_size}, tao {tao})")]
    EmptyBreedingPool { pop_size: usize, tao: f64 },

    #[error("cannot select from an empty population")]
    EmptyPopulation,
}
