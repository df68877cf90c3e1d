//! Real-valued genetic operators.
//!
//! Each operator takes the population slice it acts on plus an explicit RNG
//! and returns a new vector of chromosomes. Draw order is fixed (member by
//! member, allele by allele) so that a seeded run is reproducible.
//!
//! # Operators
//!
//! - [`initial_population`]: uniform sampling inside the domain box
//! - [`single_point_crossover`]: tail swap at one cut point per pair — O(n·d)
//! - [`gene_wise_mutation`]: independent Gaussian perturbation per allele — O(n·d)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution Programs*

use super::chromosome::Chromosome;
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};

/// Builds `pop_size` chromosomes with `dims` alleles drawn uniformly from
/// `[lower, upper]`.
pub fn initial_population<R: Rng>(
    pop_size: usize,
    dims: usize,
    lower: f64,
    upper: f64,
    rng: &mut R,
) -> Vec<Chromosome> {
    (0..pop_size)
        .map(|_| Chromosome::new((0..dims).map(|_| rng.random_range(lower..=upper)).collect()))
        .collect()
}

/// Single cut-point crossover over disjoint consecutive pairs.
///
/// For each pair one uniform draw decides whether crossover happens
/// (probability `p_c`). If it does, a cut point `k` is drawn from
/// `[1, dims - 1]` and the children are `p1[..k] ++ p2[k..]` and
/// `p2[..k] ++ p1[k..]`. Otherwise both parents pass through unchanged.
///
/// Chromosomes with fewer than two alleles have no cut point, so their
/// pairs always pass through. A trailing unpaired member (odd input
/// length) also passes through, keeping the output length equal to the
/// input length.
///
/// # Panics
/// Panics if the two parents of a pair have different lengths.
pub fn single_point_crossover<R: Rng>(
    parents: &[Chromosome],
    p_c: f64,
    rng: &mut R,
) -> Vec<Chromosome> {
    let mut next_gen = Vec::with_capacity(parents.len());

    for pair in parents.chunks(2) {
        let [p1, p2] = pair else {
            next_gen.extend_from_slice(pair);
            continue;
        };
        let dims = p1.dims();
        assert_eq!(dims, p2.dims(), "parents must have equal length");

        if rng.random_range(0.0..1.0) >= p_c || dims < 2 {
            next_gen.push(p1.clone());
            next_gen.push(p2.clone());
            continue;
        }

        let cut = rng.random_range(1..dims);
        next_gen.push(splice(p1, p2, cut));
        next_gen.push(splice(p2, p1, cut));
    }

    next_gen
}

/// `head[..cut] ++ tail[cut..]`
fn splice(head: &Chromosome, tail: &Chromosome, cut: usize) -> Chromosome {
    let mut alleles = Vec::with_capacity(head.dims());
    alleles.extend_from_slice(&head.alleles()[..cut]);
    alleles.extend_from_slice(&tail.alleles()[cut..]);
    Chromosome::new(alleles)
}

/// The noise distribution used by [`gene_wise_mutation`].
///
/// The normal's standard-deviation parameter is `std_dev²`, not `std_dev`.
/// For the default domain (`std_dev` around 0.011) that makes the
/// perturbations roughly a hundred times smaller than the nominal deviation.
/// Seeded runs are pinned to the squared form.
pub fn mutation_noise(std_dev: f64) -> Result<Normal<f64>, NormalError> {
    Normal::new(0.0, std_dev * std_dev)
}

/// Gene-wise Gaussian mutation.
///
/// Every allele of every chromosome gets one uniform draw; with probability
/// `p_m` a sample of `noise` is added to it, otherwise it is copied. Every
/// output chromosome is new and unevaluated.
pub fn gene_wise_mutation<R: Rng>(
    population: &[Chromosome],
    p_m: f64,
    noise: &Normal<f64>,
    rng: &mut R,
) -> Vec<Chromosome> {
    population
        .iter()
        .map(|c| {
            let alleles = c
                .alleles()
                .iter()
                .map(|&a| {
                    if rng.random_range(0.0..1.0) < p_m {
                        a + noise.sample(rng)
                    } else {
                        a
                    }
                })
                .collect();
            Chromosome::new(alleles)
        })
        .collect()
}
