//! Core trait definitions for the GA.
//!
//! [`FitnessFunction`] is the contract between the generic engine and the
//! caller's objective: a pure mapping from an allele vector to a score.

use std::sync::Arc;

/// An objective function over real-valued alleles.
///
/// Any `Fn(&[f64]) -> f64 + Send + Sync` closure implements this trait, so
/// most callers never name it:
///
/// ```
/// use u_evolution::ga::FitnessFunction;
///
/// let rastrigin = |x: &[f64]| {
///     10.0 * x.len() as f64
///         + x.iter()
///             .map(|&v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos())
///             .sum::<f64>()
/// };
/// assert_eq!(rastrigin.fitness(&[0.0, 0.0]), 0.0);
/// ```
///
/// # Thread Safety
///
/// `Send + Sync` is required because a population may be evaluated in
/// parallel with rayon when the `parallel` feature is enabled.
pub trait FitnessFunction: Send + Sync {
    /// Scores one allele vector.
    fn fitness(&self, alleles: &[f64]) -> f64;
}

impl<F> FitnessFunction for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn fitness(&self, alleles: &[f64]) -> f64 {
        self(alleles)
    }
}

/// Shared handle to a fitness function.
pub type SharedFitness = Arc<dyn FitnessFunction>;

/// The default objective: `Σ xᵢ²`.
pub fn sum_of_squares(alleles: &[f64]) -> f64 {
    alleles.iter().map(|x| x * x).sum()
}

/// Wraps a closure into a [`SharedFitness`].
pub fn shared<F>(f: F) -> SharedFitness
where
    F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
{
    Arc::new(f)
}
