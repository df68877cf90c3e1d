//! A single candidate solution.

use super::types::FitnessFunction;

/// One candidate solution: a fixed-length vector of real alleles and an
/// optional fitness score.
///
/// Alleles are fixed at construction. Operators never edit a chromosome in
/// place; they build new ones, which start out unevaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    alleles: Vec<f64>,
    fitness_score: Option<f64>,
}

impl Chromosome {
    /// Creates an unevaluated chromosome.
    pub fn new(alleles: Vec<f64>) -> Self {
        Self {
            alleles,
            fitness_score: None,
        }
    }

    pub fn alleles(&self) -> &[f64] {
        &self.alleles
    }

    /// Number of alleles.
    pub fn dims(&self) -> usize {
        self.alleles.len()
    }

    /// The fitness score, or `None` before [`evaluate`](Self::evaluate).
    pub fn fitness_score(&self) -> Option<f64> {
        self.fitness_score
    }

    /// Scores this chromosome with `fitness_function`.
    pub fn evaluate(&mut self, fitness_function: &dyn FitnessFunction) {
        self.fitness_score = Some(fitness_function.fitness(&self.alleles));
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness_score.is_some()
    }
}
