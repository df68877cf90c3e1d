//! Generational genetic algorithm for real-valued optimization.
//!
//! Optimizes a caller-supplied objective `f: ℝⁿ → ℝ` (maximize or minimize)
//! with a classic evolution program:
//!
//! - **Representation**: fixed-length vectors of real alleles.
//! - **Selection**: proportional (roulette wheel), truncation, deterministic
//!   and stochastic binary tournaments, linear ranking.
//! - **Variation**: single cut-point crossover and gene-wise Gaussian
//!   mutation.
//! - **Reporting**: best/worst/average statistics every tenth generation and
//!   at the end of the run.
//!
//! A run is driven by one seeded RNG handle, so a fixed seed and
//! configuration reproduce it exactly.
//!
//! ```
//! use u_evolution::ga::{Ga, GaConfig, SelectionMechanism};
//!
//! let config = GaConfig::default()
//!     .with_dims(2)
//!     .with_domain(-5.0, 5.0)
//!     .with_maximize(false)
//!     .with_selection(SelectionMechanism::DeterministicTournament)
//!     .with_seed(42);
//! let mut ga = Ga::with_default_fitness(config).unwrap();
//! let result = ga.simulate().unwrap();
//! println!("{}", result.final_report);
//! ```

pub mod error;
pub mod ga;
pub mod random;

pub use error::{GaError, SelectionError};
