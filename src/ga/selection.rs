//! Parent selection strategies.
//!
//! Fitness-proportional (roulette-wheel) selection drives the evolutionary
//! loop; tournament selection is provided for experiments with stronger,
//! scaling-free pressure. Both operate on a population plus the
//! generation's raw fitness map.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use crate::error::GaError;

use super::chromosome::{Chromosome, FitnessMap};
use super::mode::Mode;

/// Draws two parents independently with replacement, with probability
/// proportional to the scaling-window performance weight
/// ([`Chromosome::performance_value`]); the two may be identical by chance.
///
/// `f_prime` must be the current generation's scaling reference
/// ([`Mode::scaling_reference`] over `fitness`), which makes every weight
/// non-negative. When the total weight is exactly zero — every individual
/// tied with the generation's worst — selection falls back to a uniform
/// random draw.
///
/// # Panics
/// Panics if `population` is empty or `fitness` does not cover it.
pub fn wheel_selection<R: Rng>(
    population: &[Chromosome],
    fitness: &FitnessMap,
    f_prime: f64,
    mode: Mode,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    assert!(!population.is_empty(), "cannot select from empty population");

    let weights: Vec<f64> = population
        .iter()
        .map(|chrom| chrom.performance_value(fitness, f_prime, mode))
        .collect();
    let total: f64 = weights.iter().sum();

    if total <= 0.0 {
        let first = population[rng.random_range(0..population.len())].clone();
        let second = population[rng.random_range(0..population.len())].clone();
        return (first, second);
    }

    let first = spin(population, &weights, total, rng).clone();
    let second = spin(population, &weights, total, rng).clone();
    (first, second)
}

/// One spin of the wheel: cumulative scan against a uniform threshold.
fn spin<'a, R: Rng>(
    population: &'a [Chromosome],
    weights: &[f64],
    total: f64,
    rng: &mut R,
) -> &'a Chromosome {
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (chrom, &w) in population.iter().zip(weights) {
        cumulative += w;
        if cumulative > threshold {
            return chrom;
        }
    }
    population.last().expect("population is non-empty") // floating-point fallback
}

/// Samples `k` distinct individuals uniformly without replacement and
/// returns the one with the best raw fitness under `mode`; ties go to the
/// first encountered.
///
/// Fails with [`GaError::InvalidTournamentSize`] unless
/// `0 < k <= population.len()`.
///
/// # Panics
/// Panics if `fitness` does not cover the population.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Chromosome],
    k: usize,
    fitness: &FitnessMap,
    mode: Mode,
    rng: &mut R,
) -> Result<&'a Chromosome, GaError> {
    if k == 0 || k > population.len() {
        return Err(GaError::InvalidTournamentSize {
            k,
            population: population.len(),
        });
    }

    let mut best: Option<(&Chromosome, f64)> = None;
    for index in rand::seq::index::sample(rng, population.len(), k) {
        let chrom = &population[index];
        let f = fitness
            .get(chrom)
            .copied()
            .expect("fitness map must cover the population");
        match best {
            Some((_, best_f)) if !mode.better(f, best_f) => {}
            _ => best = Some((chrom, f)),
        }
    }
    Ok(best.expect("tournament size is at least one").0)
}
