//! Generational genetic algorithm over real-valued chromosomes.
//!
//! The caller supplies an objective ([`FitnessFunction`]) and a
//! [`GaConfig`]; [`Ga`] runs selection → crossover → mutation → evaluation
//! for a fixed number of generations and reports statistics along the way.
//!
//! # Key Types
//!
//! - [`Chromosome`]: A fixed-length allele vector with an optional score
//! - [`Population`]: One generation, with aggregates computed on evaluation
//! - [`SelectionMechanism`]: Proportional, truncation, tournaments, ranking
//! - [`GaConfig`]: Run parameters with validation
//! - [`Ga`]: The orchestrator and its [`GaState`] lifecycle
//! - [`GenerationReport`]: Periodic best/worst/average statistics
//!
//! # Submodules
//!
//! - [`operators`]: Initialization, single-point crossover, gene-wise mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution Programs*

mod chromosome;
mod config;
pub mod operators;
mod population;
mod report;
mod runner;
mod selection;
mod types;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use population::Population;
pub use report::{GenerationReport, ScoredAlleles};
pub use runner::{Ga, GaResult, GaState, REPORT_INTERVAL};
pub use selection::{
    linear_ranking_pmf, proportional_pmf, truncation_pool_size, ParameterSpec, SelectionKind,
    SelectionMechanism,
};
pub use types::{shared, sum_of_squares, FitnessFunction, SharedFitness};
