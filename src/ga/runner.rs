//! GA evolutionary loop execution.
//!
//! [`Ga`] orchestrates the complete evolutionary process:
//! seeding → initialization → evaluation → selection → crossover →
//! mutation → evaluation → repeat.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::operators;
use super::population::Population;
use super::report::GenerationReport;
use super::types::{sum_of_squares, SharedFitness};
use crate::error::GaError;
use crate::random::{create_rng, seed_from_clock, GaRng};
use rand_distr::Normal;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Reports are emitted every this many generations (and on the last one).
pub const REPORT_INTERVAL: usize = 10;

/// Lifecycle of a [`Ga`].
///
/// ```text
/// Unseeded → Seeded → Initialized → Evaluated ⟲ (iterate) → Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaState {
    /// No RNG seed yet; only [`Ga::unseeded`] produces this state.
    Unseeded,
    /// Seeded, no population.
    Seeded,
    /// Population built but not evaluated.
    Initialized,
    /// Current population evaluated; ready to iterate.
    Evaluated,
    /// `t_max` generations have run.
    Done,
}

/// Result of a complete [`Ga::simulate`] run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Statistics of the final population.
    pub final_report: GenerationReport,

    /// The final population.
    pub population: Population,

    /// Every report emitted during the run, in order.
    pub reports: Vec<GenerationReport>,

    /// Best fitness of each evaluated generation, generation 0 first.
    ///
    /// Selection is not elitist, so this need not be monotonic.
    pub history: Vec<f64>,

    /// Total number of generations executed.
    pub generations: usize,

    /// The seed the run used.
    pub seed: u64,
}

/// The genetic algorithm orchestrator.
///
/// Owns the configuration, the fitness function, the only RNG of the run,
/// the generation counter and the current population.
///
/// # Usage
///
/// ```
/// use u_evolution::ga::{shared, Ga, GaConfig};
///
/// let config = GaConfig::default()
///     .with_dims(2)
///     .with_maximize(false)
///     .with_t_max(20)
///     .with_seed(42);
/// let mut ga = Ga::new(config, shared(|x: &[f64]| x.iter().map(|v| v.abs()).sum())).unwrap();
/// let result = ga.simulate().unwrap();
/// assert_eq!(result.generations, 20);
/// ```
pub struct Ga {
    config: GaConfig,
    fitness_function: SharedFitness,
    noise: Normal<f64>,
    rand_seed: Option<u64>,
    rng: Option<GaRng>,
    t: usize,
    population: Option<Population>,
    reports: Vec<GenerationReport>,
    history: Vec<f64>,
}

impl fmt::Debug for Ga {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ga")
            .field("config", &self.config)
            .field("rand_seed", &self.rand_seed)
            .field("t", &self.t)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Ga {
    /// Validates `config` and seeds the RNG from `config.rand_seed` (or the
    /// clock when unset).
    pub fn new(config: GaConfig, fitness_function: SharedFitness) -> Result<Self, GaError> {
        let mut ga = Self::unseeded(config, fitness_function)?;
        ga.seed_random(ga.config.rand_seed)?;
        Ok(ga)
    }

    /// [`new`](Self::new) with the default sum-of-squares objective.
    pub fn with_default_fitness(config: GaConfig) -> Result<Self, GaError> {
        Self::new(config, Arc::new(sum_of_squares))
    }

    /// Validates `config` without seeding; call
    /// [`seed_random`](Self::seed_random) before running.
    pub fn unseeded(config: GaConfig, fitness_function: SharedFitness) -> Result<Self, GaError> {
        config.validate()?;
        let noise = operators::mutation_noise(config.mutation_standard_deviation())
            .map_err(|e| GaError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            history: Vec::with_capacity(config.t_max + 1),
            config,
            fitness_function,
            noise,
            rand_seed: None,
            rng: None,
            t: 0,
            population: None,
            reports: Vec::new(),
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The seed in use, once seeded.
    pub fn rand_seed(&self) -> Option<u64> {
        self.rand_seed
    }

    /// The generation counter `t`.
    pub fn generation(&self) -> usize {
        self.t
    }

    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    /// Reports emitted so far.
    pub fn reports(&self) -> &[GenerationReport] {
        &self.reports
    }

    /// Best fitness of every evaluated generation so far.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn state(&self) -> GaState {
        match (&self.rng, &self.population) {
            (None, _) => GaState::Unseeded,
            (Some(_), None) => GaState::Seeded,
            (Some(_), Some(pop)) if !pop.is_evaluated() => GaState::Initialized,
            (Some(_), Some(_)) if self.t >= self.config.t_max => GaState::Done,
            (Some(_), Some(_)) => GaState::Evaluated,
        }
    }

    /// Seeds the run's RNG. Allowed once.
    ///
    /// With `None`, a seed in `[1, 123456789]` is derived from the clock.
    /// The seed is logged either way and returned.
    pub fn seed_random(&mut self, given_seed: Option<u64>) -> Result<u64, GaError> {
        if let Some(seed) = self.rand_seed {
            return Err(GaError::AlreadySeeded(seed));
        }
        let seed = given_seed.unwrap_or_else(seed_from_clock);
        info!(seed, "seeding random");
        self.rand_seed = Some(seed);
        self.rng = Some(create_rng(seed));
        Ok(seed)
    }

    fn rng(&mut self) -> Result<&mut GaRng, GaError> {
        self.rng.as_mut().ok_or(GaError::NotSeeded)
    }

    fn current(&self) -> Result<&Population, GaError> {
        self.population.as_ref().ok_or(GaError::NotInitialized)
    }

    /// Builds the generation-0 population uniformly inside the domain.
    pub fn initialize_population(&mut self) -> Result<(), GaError> {
        if self.population.is_some() {
            return Err(GaError::AlreadyInitialized);
        }
        let GaConfig {
            pop_size,
            dims,
            domain_lower,
            domain_upper,
            ..
        } = self.config;
        let members =
            operators::initial_population(pop_size, dims, domain_lower, domain_upper, self.rng()?);
        self.population = Some(Population::new(members));
        Ok(())
    }

    /// Evaluates the current population and records its best fitness.
    ///
    /// An already evaluated population is left untouched, so `history`
    /// holds exactly one entry per generation.
    pub fn evaluate_population(&mut self) -> Result<(), GaError> {
        let fitness = Arc::clone(&self.fitness_function);
        let parallel = self.config.parallel;
        let maximize = self.config.maximize;
        let population = self.population.as_mut().ok_or(GaError::NotInitialized)?;
        if population.is_evaluated() {
            return Ok(());
        }

        #[cfg(feature = "parallel")]
        if parallel {
            population.par_evaluate(fitness.as_ref());
        } else {
            population.evaluate(fitness.as_ref());
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = parallel;
            population.evaluate(fitness.as_ref());
        }

        let best = population.best(maximize)?.fitness_score();
        self.history.push(best.ok_or(GaError::NotEvaluated)?);
        Ok(())
    }

    /// Runs the configured selection mechanism on the current population and
    /// returns the parent pool in selection order.
    pub fn selection_mechanism(&mut self) -> Result<Vec<Chromosome>, GaError> {
        let maximize = self.config.maximize;
        let selection = self.config.selection;
        let (fitnesses, sum) = {
            let pop = self.current()?;
            (pop.fitnesses()?, pop.sum_of_fitnesses()?)
        };

        let indices = selection.next_population(&fitnesses, sum, maximize, self.rng()?)?;

        let members = self.current()?.members();
        Ok(indices.into_iter().map(|i| members[i].clone()).collect())
    }

    /// Single cut-point crossover with probability `p_c` per pair.
    ///
    /// See [`operators::single_point_crossover`].
    pub fn single_point_crossover(
        &mut self,
        parents: &[Chromosome],
    ) -> Result<Vec<Chromosome>, GaError> {
        let p_c = self.config.p_c;
        Ok(operators::single_point_crossover(parents, p_c, self.rng()?))
    }

    /// Gene-wise Gaussian mutation with probability `p_m` per allele.
    ///
    /// See [`operators::gene_wise_mutation`].
    pub fn gene_wise_mutation(
        &mut self,
        population: &[Chromosome],
    ) -> Result<Vec<Chromosome>, GaError> {
        let p_m = self.config.p_m;
        let noise = self.noise;
        Ok(operators::gene_wise_mutation(
            population,
            p_m,
            &noise,
            self.rng()?,
        ))
    }

    /// Selection → crossover → mutation, producing an unevaluated population.
    pub fn create_next_population(&mut self) -> Result<Population, GaError> {
        let parents = self.selection_mechanism()?;
        let children = self.single_point_crossover(&parents)?;
        let mutated = self.gene_wise_mutation(&children)?;

        if mutated.len() != self.config.pop_size {
            return Err(GaError::PopulationSize {
                expected: self.config.pop_size,
                actual: mutated.len(),
            });
        }
        Ok(Population::new(mutated))
    }

    /// Statistics of the current population, labelled with generation `t`.
    pub fn report(&self) -> Result<GenerationReport, GaError> {
        GenerationReport::from_population(self.t, self.current()?, self.config.maximize)
    }

    /// Advances one generation.
    ///
    /// Increments `t`; past `t_max` this does nothing else. Otherwise it
    /// replaces the population with the next evaluated generation and, on
    /// every tenth and on the final generation, emits and returns a report.
    ///
    /// If building the next generation fails, `t` and the population are
    /// left as they were.
    pub fn iterate(&mut self) -> Result<Option<GenerationReport>, GaError> {
        if !self.current()?.is_evaluated() {
            return Err(GaError::NotEvaluated);
        }

        if self.t >= self.config.t_max {
            self.t += 1;
            return Ok(None);
        }

        let next = self.create_next_population()?;
        self.t += 1;
        self.population = Some(next);
        self.evaluate_population()?;
        debug!(generation = self.t, "generation evaluated");

        if self.t % REPORT_INTERVAL != 0 && self.t != self.config.t_max {
            return Ok(None);
        }

        let report = self.report()?;
        info!(
            generation = report.generation,
            best = report.best.fitness,
            worst = report.worst.fitness,
            average = report.average_fitness,
            "generation report"
        );
        self.reports.push(report.clone());
        Ok(Some(report))
    }

    /// Runs the whole simulation: initialize, evaluate, then `t_max`
    /// iterations.
    #[instrument(level = "debug", skip_all, fields(seed = ?self.rand_seed, t_max = self.config.t_max))]
    pub fn simulate(&mut self) -> Result<GaResult, GaError> {
        self.initialize_population()?;
        self.evaluate_population()?;
        for _ in 0..self.config.t_max {
            self.iterate()?;
        }

        Ok(GaResult {
            final_report: self.report()?,
            population: self.current()?.clone(),
            reports: self.reports.clone(),
            history: self.history.clone(),
            generations: self.t,
            seed: self.rand_seed.ok_or(GaError::NotSeeded)?,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
