//! Selection mechanisms for the GA.
//!
//! A selection mechanism turns the current population's fitness vector into
//! an index-defined parent pool: `pop_size` indices (repeats allowed) into
//! that vector. Crossover then pairs the pool up in order.
//!
//! Unlike the usual minimize-only convention, every mechanism here takes a
//! `maximize` flag and orients itself accordingly.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::SelectionError;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Selection strategy for building the parent pool.
///
/// Variants carry their own validated parameters. Build them through the
/// checked constructors ([`truncation`](Self::truncation),
/// [`stochastic_tournament`](Self::stochastic_tournament),
/// [`linear_ranking`](Self::linear_ranking)) or from a parameter map with
/// [`from_parameters`](Self::from_parameters).
///
/// # Examples
///
/// ```
/// use u_evolution::ga::SelectionMechanism;
///
/// let roulette = SelectionMechanism::Proportional;
/// let truncation = SelectionMechanism::truncation(0.4).unwrap();
/// assert!(SelectionMechanism::linear_ranking(2.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMechanism {
    /// Fitness-proportionate (roulette-wheel) selection with replacement.
    ///
    /// `pmf[i] = f[i] / Σf`. When minimizing, each mass is inverted and the
    /// result renormalized. Requires a positive fitness total and no
    /// negative fitness.
    ///
    /// # Complexity
    /// O(n log n) per generation (cumulative table + binary search)
    #[default]
    Proportional,

    /// Truncation selection: sample uniformly from the top `floor(n·tao)`.
    ///
    /// `tao` must lie in the open interval (0, 1).
    Truncation { tao: f64 },

    /// Binary tournament: the fitter of two uniform draws wins.
    DeterministicTournament,

    /// Binary tournament where the fitter contestant wins only with
    /// probability `prob`, otherwise the other one is taken.
    ///
    /// `prob` must lie in the open interval (0, 1).
    StochasticTournament { prob: f64 },

    /// Linear ranking.
    ///
    /// With ranks `r = 0` (worst) .. `n-1` (best), `min = 2 - max`:
    ///
    /// `pmf[r] = (min + r/(n-1)·(max - min)) / n`
    ///
    /// `max` is the expected number of copies of the best member and must
    /// lie in [1, 2].
    LinearRanking { max: f64 },
}

/// Names the five mechanisms without their parameters.
///
/// Used by configuration front-ends to list the choices and to learn which
/// parameters each one needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionKind {
    Proportional,
    Truncation,
    DeterministicTournament,
    StochasticTournament,
    LinearRanking,
}

/// Describes one mechanism-specific parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    /// Human-readable prompt text.
    pub prompt: &'static str,
    pub default: f64,
}

const TAO: ParameterSpec = ParameterSpec {
    name: "tao",
    prompt: "Enter Tao (top percent cut-line)",
    default: 0.4,
};

const PROB: ParameterSpec = ParameterSpec {
    name: "prob",
    prompt: "Enter Prob (chance the fitter contestant wins)",
    default: 0.75,
};

const MAX: ParameterSpec = ParameterSpec {
    name: "max",
    prompt: "Enter Max (from 1 to 2)",
    default: 1.2,
};

impl SelectionKind {
    /// All kinds, in menu order.
    pub const ALL: [SelectionKind; 5] = [
        SelectionKind::Proportional,
        SelectionKind::Truncation,
        SelectionKind::DeterministicTournament,
        SelectionKind::StochasticTournament,
        SelectionKind::LinearRanking,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SelectionKind::Proportional => "Proportional",
            SelectionKind::Truncation => "Truncation",
            SelectionKind::DeterministicTournament => "Tournament (Deterministic)",
            SelectionKind::StochasticTournament => "Tournament (Stochastic)",
            SelectionKind::LinearRanking => "Linear Ranking",
        }
    }

    /// The parameters this mechanism requires, with prompts and defaults.
    pub fn parameters(self) -> &'static [ParameterSpec] {
        match self {
            SelectionKind::Proportional | SelectionKind::DeterministicTournament => &[],
            SelectionKind::Truncation => &[TAO],
            SelectionKind::StochasticTournament => &[PROB],
            SelectionKind::LinearRanking => &[MAX],
        }
    }

    /// Builds the mechanism with every parameter at its default.
    pub fn with_defaults(self) -> SelectionMechanism {
        match self {
            SelectionKind::Proportional => SelectionMechanism::Proportional,
            SelectionKind::Truncation => SelectionMechanism::Truncation { tao: TAO.default },
            SelectionKind::DeterministicTournament => SelectionMechanism::DeterministicTournament,
            SelectionKind::StochasticTournament => {
                SelectionMechanism::StochasticTournament { prob: PROB.default }
            }
            SelectionKind::LinearRanking => SelectionMechanism::LinearRanking { max: MAX.default },
        }
    }
}

fn check_open_unit(name: &'static str, value: f64) -> Result<f64, SelectionError> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(SelectionError::ParameterOutOfRange {
            name,
            value,
            range: "(0, 1)",
        })
    }
}

fn required(
    params: &HashMap<String, f64>,
    spec: &ParameterSpec,
) -> Result<f64, SelectionError> {
    params
        .get(spec.name)
        .copied()
        .ok_or(SelectionError::MissingParameter(spec.name))
}

impl SelectionMechanism {
    /// Truncation selection keeping the top `tao` fraction.
    pub fn truncation(tao: f64) -> Result<Self, SelectionError> {
        Ok(Self::Truncation {
            tao: check_open_unit(TAO.name, tao)?,
        })
    }

    /// Stochastic binary tournament with win probability `prob`.
    pub fn stochastic_tournament(prob: f64) -> Result<Self, SelectionError> {
        Ok(Self::StochasticTournament {
            prob: check_open_unit(PROB.name, prob)?,
        })
    }

    /// Linear ranking with `max ∈ [1, 2]`.
    pub fn linear_ranking(max: f64) -> Result<Self, SelectionError> {
        if (1.0..=2.0).contains(&max) {
            Ok(Self::LinearRanking { max })
        } else {
            Err(SelectionError::ParameterOutOfRange {
                name: MAX.name,
                value: max,
                range: "[1, 2]",
            })
        }
    }

    /// Builds a mechanism from a kind and a name → value parameter map.
    ///
    /// Required parameters must be present; defaults are not filled in.
    /// Unknown keys are ignored.
    pub fn from_parameters(
        kind: SelectionKind,
        params: &HashMap<String, f64>,
    ) -> Result<Self, SelectionError> {
        match kind {
            SelectionKind::Proportional => Ok(Self::Proportional),
            SelectionKind::DeterministicTournament => Ok(Self::DeterministicTournament),
            SelectionKind::Truncation => Self::truncation(required(params, &TAO)?),
            SelectionKind::StochasticTournament => {
                Self::stochastic_tournament(required(params, &PROB)?)
            }
            SelectionKind::LinearRanking => Self::linear_ranking(required(params, &MAX)?),
        }
    }

    pub fn kind(&self) -> SelectionKind {
        match self {
            Self::Proportional => SelectionKind::Proportional,
            Self::Truncation { .. } => SelectionKind::Truncation,
            Self::DeterministicTournament => SelectionKind::DeterministicTournament,
            Self::StochasticTournament { .. } => SelectionKind::StochasticTournament,
            Self::LinearRanking { .. } => SelectionKind::LinearRanking,
        }
    }

    /// Re-checks the carried parameters.
    ///
    /// Enum literals bypass the checked constructors, so the orchestrator
    /// calls this once before a run.
    pub fn validate(&self) -> Result<(), SelectionError> {
        match *self {
            Self::Proportional | Self::DeterministicTournament => Ok(()),
            Self::Truncation { tao } => Self::truncation(tao).map(|_| ()),
            Self::StochasticTournament { prob } => Self::stochastic_tournament(prob).map(|_| ()),
            Self::LinearRanking { max } => Self::linear_ranking(max).map(|_| ()),
        }
    }

    /// Selects `fitnesses.len()` parent indices.
    ///
    /// `sum_of_fitnesses` is the population's precomputed total (only
    /// proportional selection reads it). Every returned index lies in
    /// `[0, fitnesses.len())`.
    pub fn next_population<R: Rng>(
        &self,
        fitnesses: &[f64],
        sum_of_fitnesses: f64,
        maximize: bool,
        rng: &mut R,
    ) -> Result<Vec<usize>, SelectionError> {
        if fitnesses.is_empty() {
            return Err(SelectionError::EmptyPopulation);
        }
        self.validate()?;

        match *self {
            Self::Proportional => {
                let pmf = proportional_pmf(fitnesses, sum_of_fitnesses, maximize)?;
                Ok(sample_from_pmf(&pmf, fitnesses.len(), rng))
            }
            Self::Truncation { tao } => truncation(fitnesses, tao, maximize, rng),
            Self::DeterministicTournament => Ok(tournament(fitnesses, 1.0, maximize, rng)),
            Self::StochasticTournament { prob } => {
                Ok(tournament(fitnesses, prob, maximize, rng))
            }
            Self::LinearRanking { max } => Ok(linear_ranking(fitnesses, max, maximize, rng)),
        }
    }
}

/// `a` is fitter than `b` under the given direction.
fn fitter(a: f64, b: f64, maximize: bool) -> bool {
    if maximize {
        a > b
    } else {
        a < b
    }
}

/// Probability masses for proportional selection.
///
/// When minimizing, a member with zero (or subnormal) fitness gets an
/// infinite inverted mass; those members then share the whole mass evenly,
/// which is the limit of the inversion.
pub fn proportional_pmf(
    fitnesses: &[f64],
    sum_of_fitnesses: f64,
    maximize: bool,
) -> Result<Vec<f64>, SelectionError> {
    if !(sum_of_fitnesses > 0.0) {
        return Err(SelectionError::NonPositiveFitnessSum(sum_of_fitnesses));
    }
    if let Some((index, &value)) = fitnesses.iter().enumerate().find(|(_, &f)| f < 0.0) {
        return Err(SelectionError::NegativeFitness { index, value });
    }

    let pmf: Vec<f64> = fitnesses.iter().map(|f| f / sum_of_fitnesses).collect();
    if maximize {
        return Ok(pmf);
    }

    let inverted: Vec<f64> = pmf.iter().map(|p| 1.0 / p).collect();
    let unbounded = inverted.iter().filter(|w| w.is_infinite()).count();
    if unbounded > 0 {
        let share = 1.0 / unbounded as f64;
        return Ok(inverted
            .iter()
            .map(|w| if w.is_infinite() { share } else { 0.0 })
            .collect());
    }

    // Scale by the largest mass first so the total cannot overflow.
    let largest = inverted.iter().copied().fold(0.0, f64::max);
    let total: f64 = inverted.iter().map(|w| w / largest).sum();
    Ok(inverted.iter().map(|w| w / largest / total).collect())
}

/// Draws `count` indices with replacement according to `pmf`.
///
/// One uniform draw per index, looked up in the cumulative table.
fn sample_from_pmf<R: Rng>(pmf: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    let mut cumulative = Vec::with_capacity(pmf.len());
    let mut acc = 0.0;
    for &p in pmf {
        acc += p;
        cumulative.push(acc);
    }
    let total = acc;
    let last = pmf.len() - 1;

    (0..count)
        .map(|_| {
            let threshold = rng.random_range(0.0..1.0) * total;
            // First slot whose cumulative mass exceeds the threshold.
            let idx = cumulative.partition_point(|&c| c <= threshold);
            idx.min(last) // floating-point fallback
        })
        .collect()
}

/// Member indices ordered best first (stable on ties).
fn ranked_best_first(fitnesses: &[f64], maximize: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitnesses.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = fitnesses[a]
            .partial_cmp(&fitnesses[b])
            .unwrap_or(Ordering::Equal);
        if maximize {
            ord.reverse()
        } else {
            ord
        }
    });
    order
}

/// Size of the truncation pool: `floor(n · tao)`.
pub fn truncation_pool_size(pop_size: usize, tao: f64) -> usize {
    (pop_size as f64 * tao).floor() as usize
}

fn truncation<R: Rng>(
    fitnesses: &[f64],
    tao: f64,
    maximize: bool,
    rng: &mut R,
) -> Result<Vec<usize>, SelectionError> {
    let n = fitnesses.len();
    let keep = truncation_pool_size(n, tao);
    if keep == 0 {
        return Err(SelectionError::EmptyBreedingPool { pop_size: n, tao });
    }

    let mut pool = ranked_best_first(fitnesses, maximize);
    pool.truncate(keep);

    Ok((0..n).map(|_| pool[rng.random_range(0..keep)]).collect())
}

/// Binary tournaments; the fitter contestant wins with probability `prob`.
///
/// `prob == 1.0` is the deterministic tournament and draws no extra
/// random number per slot. Ties go to the first contestant drawn.
fn tournament<R: Rng>(fitnesses: &[f64], prob: f64, maximize: bool, rng: &mut R) -> Vec<usize> {
    let n = fitnesses.len();
    (0..n)
        .map(|_| {
            let a = rng.random_range(0..n);
            let b = rng.random_range(0..n);
            let (winner, loser) = if fitter(fitnesses[b], fitnesses[a], maximize) {
                (b, a)
            } else {
                (a, b)
            };
            if prob >= 1.0 || rng.random_range(0.0..1.0) < prob {
                winner
            } else {
                loser
            }
        })
        .collect()
}

/// Rank masses for linear ranking, indexed by rank (0 = worst).
pub fn linear_ranking_pmf(pop_size: usize, max: f64) -> Vec<f64> {
    if pop_size == 1 {
        return vec![1.0];
    }
    let min = 2.0 - max;
    let n = pop_size as f64;
    let span = (pop_size - 1) as f64;
    (0..pop_size)
        .map(|r| (min + r as f64 / span * (max - min)) / n)
        .collect()
}

fn linear_ranking<R: Rng>(fitnesses: &[f64], max: f64, maximize: bool, rng: &mut R) -> Vec<usize> {
    let n = fitnesses.len();
    let mut worst_first = ranked_best_first(fitnesses, maximize);
    worst_first.reverse();

    let pmf = linear_ranking_pmf(n, max);
    sample_from_pmf(&pmf, n, rng)
        .into_iter()
        .map(|rank| worst_first[rank])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn counts(mechanism: SelectionMechanism, fitnesses: &[f64], maximize: bool) -> Vec<u32> {
        let sum: f64 = fitnesses.iter().sum();
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; fitnesses.len()];
        for _ in 0..5000 {
            for idx in mechanism
                .next_population(fitnesses, sum, maximize, &mut rng)
                .unwrap()
            {
                counts[idx] += 1;
            }
        }
        counts
    }

    // ---- Construction ----

    #[test]
    fn test_default_is_proportional() {
        assert_eq!(SelectionMechanism::default(), SelectionMechanism::Proportional);
    }

    #[test]
    fn test_checked_constructors() {
        assert!(SelectionMechanism::truncation(0.4).is_ok());
        assert!(SelectionMechanism::truncation(0.0).is_err());
        assert!(SelectionMechanism::truncation(1.0).is_err());
        assert!(SelectionMechanism::stochastic_tournament(0.9).is_ok());
        assert!(SelectionMechanism::stochastic_tournament(1.0).is_err());
        assert!(SelectionMechanism::linear_ranking(1.0).is_ok());
        assert!(SelectionMechanism::linear_ranking(2.0).is_ok());
        assert_eq!(
            SelectionMechanism::linear_ranking(0.5),
            Err(SelectionError::ParameterOutOfRange {
                name: "max",
                value: 0.5,
                range: "[1, 2]",
            })
        );
    }

    #[test]
    fn test_from_parameters_requires_values() {
        let empty = HashMap::new();
        assert_eq!(
            SelectionMechanism::from_parameters(SelectionKind::Truncation, &empty),
            Err(SelectionError::MissingParameter("tao"))
        );
        assert_eq!(
            SelectionMechanism::from_parameters(SelectionKind::StochasticTournament, &empty),
            Err(SelectionError::MissingParameter("prob"))
        );
        assert_eq!(
            SelectionMechanism::from_parameters(SelectionKind::LinearRanking, &empty),
            Err(SelectionError::MissingParameter("max"))
        );
        assert_eq!(
            SelectionMechanism::from_parameters(SelectionKind::Proportional, &empty),
            Ok(SelectionMechanism::Proportional)
        );

        let params = HashMap::from([("max".to_string(), 1.5)]);
        assert_eq!(
            SelectionMechanism::from_parameters(SelectionKind::LinearRanking, &params),
            Ok(SelectionMechanism::LinearRanking { max: 1.5 })
        );
    }

    #[test]
    fn test_parameter_specs() {
        assert!(SelectionKind::Proportional.parameters().is_empty());
        assert!(SelectionKind::DeterministicTournament.parameters().is_empty());
        assert_eq!(SelectionKind::Truncation.parameters()[0].name, "tao");
        assert_eq!(SelectionKind::Truncation.parameters()[0].default, 0.4);
        assert_eq!(SelectionKind::LinearRanking.parameters()[0].default, 1.2);

        for kind in SelectionKind::ALL {
            let mechanism = kind.with_defaults();
            assert_eq!(mechanism.kind(), kind);
            assert!(mechanism.validate().is_ok(), "{} defaults", kind.label());

            let params: HashMap<String, f64> = kind
                .parameters()
                .iter()
                .map(|p| (p.name.to_string(), p.default))
                .collect();
            assert_eq!(SelectionMechanism::from_parameters(kind, &params), Ok(mechanism));
        }
    }

    #[test]
    fn test_invalid_literal_rejected_at_selection() {
        let mut rng = create_rng(1);
        let bad = SelectionMechanism::Truncation { tao: 1.5 };
        assert!(bad.next_population(&[1.0, 2.0], 3.0, true, &mut rng).is_err());
    }

    #[test]
    fn test_empty_population() {
        let mut rng = create_rng(1);
        assert_eq!(
            SelectionMechanism::DeterministicTournament.next_population(&[], 0.0, true, &mut rng),
            Err(SelectionError::EmptyPopulation)
        );
    }

    // ---- Proportional ----

    #[test]
    fn test_proportional_frequencies_converge() {
        let fitnesses = [1.0, 2.0, 3.0, 4.0];
        let counts = counts(SelectionMechanism::Proportional, &fitnesses, true);
        let total: u32 = counts.iter().sum();
        for (i, &c) in counts.iter().enumerate() {
            let freq = c as f64 / total as f64;
            let expected = fitnesses[i] / 10.0;
            assert!(
                (freq - expected).abs() < 0.02,
                "index {i}: freq {freq}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_proportional_minimize_inverts() {
        let pmf = proportional_pmf(&[1.0, 2.0, 4.0], 7.0, false).unwrap();
        // Inverted masses 7, 3.5, 1.75 normalized by 12.25.
        assert!((pmf[0] - 4.0 / 7.0).abs() < 1e-12);
        assert!((pmf[1] - 2.0 / 7.0).abs() < 1e-12);
        assert!((pmf[2] - 1.0 / 7.0).abs() < 1e-12);

        let counts = counts(SelectionMechanism::Proportional, &[1.0, 2.0, 4.0], false);
        assert!(counts[0] > counts[1] && counts[1] > counts[2], "{counts:?}");
    }

    #[test]
    fn test_proportional_minimize_zero_fitness_takes_all_mass() {
        let pmf = proportional_pmf(&[0.0, 3.0, 0.0, 1.0], 4.0, false).unwrap();
        assert_eq!(pmf, vec![0.5, 0.0, 0.5, 0.0]);

        let counts = counts(SelectionMechanism::Proportional, &[0.0, 3.0, 0.0, 1.0], false);
        assert_eq!(counts[1], 0);
        assert_eq!(counts[3], 0);
    }

    #[test]
    fn test_proportional_minimize_subnormal_fitness_takes_all_mass() {
        let fitnesses = [1e-320, 1.0, 1e-320];
        let pmf = proportional_pmf(&fitnesses, 1.0, false).unwrap();
        assert_eq!(pmf, vec![0.5, 0.0, 0.5]);

        let counts = counts(SelectionMechanism::Proportional, &fitnesses, false);
        assert_eq!(counts[1], 0);
        let total = (counts[0] + counts[2]) as f64;
        assert!((counts[0] as f64 / total - 0.5).abs() < 0.02, "{counts:?}");
    }

    #[test]
    fn test_proportional_minimize_tiny_fitnesses_stay_finite() {
        // Each inverted mass is finite (~1e308) but their sum is not.
        let fitnesses = [1e-308, 1.0, 1e-308];
        let pmf = proportional_pmf(&fitnesses, 1.0, false).unwrap();
        assert!(pmf.iter().all(|p| p.is_finite()), "{pmf:?}");
        assert!((pmf[0] - 0.5).abs() < 1e-12);
        assert!((pmf[2] - 0.5).abs() < 1e-12);
        assert!(pmf[1] < 1e-300);
    }

    #[test]
    fn test_proportional_requires_positive_sum() {
        assert_eq!(
            proportional_pmf(&[0.0, 0.0], 0.0, true),
            Err(SelectionError::NonPositiveFitnessSum(0.0))
        );
        assert_eq!(
            proportional_pmf(&[-1.0, 3.0], 2.0, true),
            Err(SelectionError::NegativeFitness {
                index: 0,
                value: -1.0
            })
        );
    }

    #[test]
    fn test_proportional_zero_mass_never_selected() {
        let counts = counts(SelectionMechanism::Proportional, &[0.0, 5.0, 0.0, 5.0], true);
        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);
    }

    // ---- Truncation ----

    #[test]
    fn test_truncation_stays_in_top_fraction() {
        let fitnesses = [3.0, 9.0, 1.0, 7.0, 5.0, 8.0, 2.0, 6.0, 4.0, 0.5];
        let mut rng = create_rng(7);
        let sel = SelectionMechanism::truncation(0.4).unwrap();

        for _ in 0..200 {
            let max_pool = sel.next_population(&fitnesses, 0.0, true, &mut rng).unwrap();
            assert_eq!(max_pool.len(), 10);
            assert!(max_pool.iter().all(|i| [1, 5, 3, 7].contains(i)), "{max_pool:?}");

            let min_pool = sel.next_population(&fitnesses, 0.0, false, &mut rng).unwrap();
            assert!(min_pool.iter().all(|i| [9, 2, 6, 0].contains(i)), "{min_pool:?}");
        }
    }

    #[test]
    fn test_truncation_empty_pool() {
        let mut rng = create_rng(7);
        let sel = SelectionMechanism::truncation(0.4).unwrap();
        assert_eq!(
            sel.next_population(&[1.0, 2.0], 3.0, true, &mut rng),
            Err(SelectionError::EmptyBreedingPool {
                pop_size: 2,
                tao: 0.4
            })
        );
    }

    #[test]
    fn test_truncation_pool_size_floors() {
        assert_eq!(truncation_pool_size(30, 0.4), 12);
        assert_eq!(truncation_pool_size(10, 0.25), 2);
        assert_eq!(truncation_pool_size(3, 0.3), 0);
    }

    // ---- Tournaments ----

    #[test]
    fn test_deterministic_tournament_never_picks_worst_over_better() {
        // The worst member can only win against itself.
        let fitnesses = [10.0, 5.0, 1.0, 8.0];
        let counts = counts(SelectionMechanism::DeterministicTournament, &fitnesses, true);
        let total: u32 = counts.iter().sum();
        // P(worst) = 1/16, P(best) = 7/16.
        let worst = counts[2] as f64 / total as f64;
        let best = counts[0] as f64 / total as f64;
        assert!((worst - 1.0 / 16.0).abs() < 0.01, "worst freq {worst}");
        assert!((best - 7.0 / 16.0).abs() < 0.01, "best freq {best}");
    }

    #[test]
    fn test_deterministic_tournament_minimize() {
        let counts = counts(
            SelectionMechanism::DeterministicTournament,
            &[10.0, 5.0, 1.0, 8.0],
            false,
        );
        assert!(counts[2] > counts[1] && counts[1] > counts[3] && counts[3] > counts[0]);
    }

    #[test]
    fn test_stochastic_tournament_softens_pressure() {
        let fitnesses = [10.0, 5.0, 1.0, 8.0];
        let det = counts(SelectionMechanism::DeterministicTournament, &fitnesses, true);
        let sto = counts(
            SelectionMechanism::stochastic_tournament(0.6).unwrap(),
            &fitnesses,
            true,
        );
        assert!(sto[0] < det[0], "best: stochastic {} vs deterministic {}", sto[0], det[0]);
        assert!(sto[2] > det[2], "worst: stochastic {} vs deterministic {}", sto[2], det[2]);
        // Fitter still favoured when prob > 0.5.
        assert!(sto[0] > sto[2]);
    }

    #[test]
    fn test_stochastic_tournament_loser_rate() {
        // The worst member wins a self-pairing (1/16) and otherwise only
        // as the loser of a mixed pairing (6/16) taken with 1 - prob.
        let prob = 0.6;
        let fitnesses = [10.0, 5.0, 1.0, 8.0];
        let counts = counts(
            SelectionMechanism::stochastic_tournament(prob).unwrap(),
            &fitnesses,
            true,
        );
        let total: u32 = counts.iter().sum();
        let worst = counts[2] as f64 / total as f64;
        let best = counts[0] as f64 / total as f64;
        let expected_worst = 1.0 / 16.0 + (1.0 - prob) * 6.0 / 16.0;
        let expected_best = 1.0 / 16.0 + prob * 6.0 / 16.0;
        assert!((worst - expected_worst).abs() < 0.01, "worst freq {worst}");
        assert!((best - expected_best).abs() < 0.01, "best freq {best}");
    }

    #[test]
    fn test_equal_fitness_roughly_uniform() {
        let counts = counts(SelectionMechanism::DeterministicTournament, &[5.0; 4], true);
        for &c in &counts {
            assert!(c > 4000, "expected roughly uniform, got {counts:?}");
        }
    }

    // ---- Linear ranking ----

    #[test]
    fn test_linear_ranking_pmf_sums_to_one() {
        for &max in &[1.0, 1.2, 1.5, 1.8, 2.0] {
            for n in [2, 3, 10, 30, 101] {
                let sum: f64 = linear_ranking_pmf(n, max).iter().sum();
                assert!((sum - 1.0).abs() < 1e-12, "max {max}, n {n}: sum {sum}");
            }
        }
    }

    #[test]
    fn test_linear_ranking_pmf_endpoints() {
        let pmf = linear_ranking_pmf(4, 2.0);
        assert!(pmf[0].abs() < 1e-15);
        assert!((pmf[3] - 0.5).abs() < 1e-15);
        // max = 1 is uniform.
        assert!(linear_ranking_pmf(5, 1.0)
            .iter()
            .all(|&p| (p - 0.2).abs() < 1e-15));
        assert_eq!(linear_ranking_pmf(1, 1.5), vec![1.0]);
    }

    #[test]
    fn test_linear_ranking_orders_by_rank() {
        let fitnesses = [10.0, 5.0, 1.0, 8.0];
        let sel = SelectionMechanism::linear_ranking(2.0).unwrap();

        let max_counts = counts(sel, &fitnesses, true);
        assert_eq!(max_counts[2], 0, "worst has zero mass at max = 2");
        assert!(max_counts[0] > max_counts[3] && max_counts[3] > max_counts[1]);

        let min_counts = counts(sel, &fitnesses, false);
        assert_eq!(min_counts[0], 0);
        assert!(min_counts[2] > min_counts[1] && min_counts[1] > min_counts[3]);
    }

    // ---- Shared contract ----

    proptest! {
        #[test]
        fn prop_indices_in_range(
            fitnesses in prop::collection::vec(0.01f64..100.0, 4..40),
            seed in any::<u64>(),
            maximize in any::<bool>(),
        ) {
            let sum: f64 = fitnesses.iter().sum();
            let mut rng = create_rng(seed);
            for kind in SelectionKind::ALL {
                let picks = kind
                    .with_defaults()
                    .next_population(&fitnesses, sum, maximize, &mut rng)
                    .unwrap();
                prop_assert_eq!(picks.len(), fitnesses.len());
                prop_assert!(picks.iter().all(|&i| i < fitnesses.len()));
            }
        }
    }
}
