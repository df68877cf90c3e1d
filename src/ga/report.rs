//! Periodic generation statistics.

use super::chromosome::Chromosome;
use super::population::Population;
use crate::error::GaError;
use std::fmt;

/// A fitness score together with the alleles that earned it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredAlleles {
    pub fitness: f64,
    pub alleles: Vec<f64>,
}

impl ScoredAlleles {
    fn from_chromosome(c: &Chromosome) -> Result<Self, GaError> {
        Ok(Self {
            fitness: c.fitness_score().ok_or(GaError::NotEvaluated)?,
            alleles: c.alleles().to_vec(),
        })
    }
}

/// Summary statistics for one evaluated generation.
///
/// `best` and `worst` follow the optimization direction: when minimizing,
/// `best` is the lowest-scoring member.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationReport {
    pub generation: usize,
    pub best: ScoredAlleles,
    pub worst: ScoredAlleles,
    pub average_fitness: f64,
}

impl GenerationReport {
    /// Summarizes an evaluated population.
    pub fn from_population(
        generation: usize,
        population: &Population,
        maximize: bool,
    ) -> Result<Self, GaError> {
        Ok(Self {
            generation,
            best: ScoredAlleles::from_chromosome(population.best(maximize)?)?,
            worst: ScoredAlleles::from_chromosome(population.worst(maximize)?)?,
            average_fitness: population.average_fitness()?,
        })
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------- Gen. {} ---------------", self.generation)?;
        writeln!(
            f,
            "Best  Fitness: {} by {:?}",
            self.best.fitness, self.best.alleles
        )?;
        writeln!(
            f,
            "Worst Fitness: {} by {:?}",
            self.worst.fitness, self.worst.alleles
        )?;
        write!(f, "Avg   Fitness: {}", self.average_fitness)
    }
}
