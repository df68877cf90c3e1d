//! One generation's chromosomes and their aggregate statistics.

use super::chromosome::Chromosome;
use super::types::FitnessFunction;
use crate::error::GaError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Aggregates filled in by [`Population::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Aggregates {
    sum_of_fitnesses: f64,
    high: usize,
    low: usize,
}

/// An ordered collection of chromosomes forming one generation.
///
/// Aggregates (`sum_of_fitnesses`, `average_fitness`, `high_score`,
/// `low_score`) are computed once inside [`evaluate`](Self::evaluate) and
/// stay frozen for the lifetime of the instance. Each generation builds a
/// fresh `Population`, so nothing ever needs invalidating.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    members: Vec<Chromosome>,
    aggregates: Option<Aggregates>,
}

impl Population {
    pub fn new(members: Vec<Chromosome>) -> Self {
        Self {
            members,
            aggregates: None,
        }
    }

    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether [`evaluate`](Self::evaluate) has run.
    pub fn is_evaluated(&self) -> bool {
        self.aggregates.is_some()
    }

    /// Evaluates every member sequentially and computes the aggregates.
    pub fn evaluate(&mut self, fitness_function: &dyn FitnessFunction) {
        for c in &mut self.members {
            c.evaluate(fitness_function);
        }
        self.aggregates = Some(self.compute_aggregates());
    }

    /// Evaluates every member on the rayon thread pool.
    ///
    /// Evaluation draws no random numbers, so the result is identical to
    /// [`evaluate`](Self::evaluate).
    #[cfg(feature = "parallel")]
    pub fn par_evaluate(&mut self, fitness_function: &dyn FitnessFunction) {
        self.members
            .par_iter_mut()
            .for_each(|c| c.evaluate(fitness_function));
        self.aggregates = Some(self.compute_aggregates());
    }

    fn compute_aggregates(&self) -> Aggregates {
        let mut sum = 0.0;
        let mut high = 0;
        let mut low = 0;
        let mut high_score = f64::NEG_INFINITY;
        let mut low_score = f64::INFINITY;

        // Strict comparisons keep the first member on ties.
        for (i, score) in self.scores().enumerate() {
            sum += score;
            if score > high_score {
                high_score = score;
                high = i;
            }
            if score < low_score {
                low_score = score;
                low = i;
            }
        }

        Aggregates {
            sum_of_fitnesses: sum,
            high,
            low,
        }
    }

    fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.members
            .iter()
            .map(|c| c.fitness_score().unwrap_or(f64::NAN))
    }

    fn aggregates(&self) -> Result<&Aggregates, GaError> {
        self.aggregates.as_ref().ok_or(GaError::NotEvaluated)
    }

    /// Fitness scores in member order.
    pub fn fitnesses(&self) -> Result<Vec<f64>, GaError> {
        self.aggregates()?;
        Ok(self.scores().collect())
    }

    /// `Σ fⱼ` over all members.
    pub fn sum_of_fitnesses(&self) -> Result<f64, GaError> {
        Ok(self.aggregates()?.sum_of_fitnesses)
    }

    pub fn average_fitness(&self) -> Result<f64, GaError> {
        let sum = self.sum_of_fitnesses()?;
        if self.members.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        Ok(sum / self.members.len() as f64)
    }

    /// The highest-scoring member (first one on ties).
    pub fn high_score(&self) -> Result<&Chromosome, GaError> {
        let agg = self.aggregates()?;
        self.members.get(agg.high).ok_or(GaError::EmptyPopulation)
    }

    /// The lowest-scoring member (first one on ties).
    pub fn low_score(&self) -> Result<&Chromosome, GaError> {
        let agg = self.aggregates()?;
        self.members.get(agg.low).ok_or(GaError::EmptyPopulation)
    }

    /// The best member for the given direction.
    pub fn best(&self, maximize: bool) -> Result<&Chromosome, GaError> {
        if maximize {
            self.high_score()
        } else {
            self.low_score()
        }
    }

    /// The worst member for the given direction.
    pub fn worst(&self, maximize: bool) -> Result<&Chromosome, GaError> {
        if maximize {
            self.low_score()
        } else {
            self.high_score()
        }
    }

    pub fn into_members(self) -> Vec<Chromosome> {
        self.members
    }
}
