//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! table construction → population initialization → evaluation →
//! wheel selection → crossover → mutation → elitist replacement → repeat,
//! until the evaluation budget is consumed.
//!
//! The loop is single-threaded and generation-synchronous: a generation's
//! fitness map is fully rebuilt before any selection for the next
//! generation, and the scaling reference is taken from that map alone
//! (a window of one generation, no historical smoothing).

use std::io::{self, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::GaError;

use super::chromosome::{Chromosome, FitnessMap};
use super::config::GaConfig;
use super::mode::Mode;
use super::objective::ObjectiveFunction;
use super::selection::wheel_selection;

/// Result of a GA run.
///
/// The [`log`](GaResult::log) field is the object of comparison across
/// encodings: one raw fitness value per budget-charged evaluation, in
/// strict evaluation order. The final best is secondary.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best individual found during the entire run.
    pub best: Chromosome,

    /// Decoded input vector of `best`.
    pub best_vector: Vec<f64>,

    /// Raw fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations evaluated (the initial population counts as
    /// the first).
    pub generations: usize,

    /// Number of budget-charged evaluations recorded; never exceeds the
    /// configured budget.
    pub evaluations: usize,

    /// Raw fitness of every budget-charged evaluation, in evaluation
    /// order.
    pub log: Vec<f64>,
}

impl GaResult {
    /// Writes the evaluation log, one real number per line, for the
    /// external statistics collaborator.
    pub fn write_log<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for value in &self.log {
            writeln!(writer, "{value}")?;
        }
        Ok(())
    }
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use bitrep::encoding::Interval;
/// use bitrep::ga::{GaConfig, GaRunner, ObjectiveFunction, Scheme};
///
/// struct Parabola;
///
/// impl ObjectiveFunction for Parabola {
///     fn evaluate(&self, input: &[f64]) -> f64 {
///         input[0] * input[0]
///     }
///     fn input_dimension(&self) -> usize {
///         1
///     }
///     fn display_name(&self) -> &str {
///         "Parabola"
///     }
/// }
///
/// let interval = Interval::new(-2.56, 2.55, 0.01).unwrap();
/// let config = GaConfig::new(interval)
///     .with_scheme(Scheme::Binary)
///     .with_population_size(10)
///     .with_evaluation_budget(200)
///     .with_seed(42);
/// let result = GaRunner::run(&Parabola, &config).unwrap();
/// assert_eq!(result.log.len(), 200);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA until the evaluation budget is consumed.
    ///
    /// Budget accounting follows the research protocol: every member of
    /// the initial population is charged, and thereafter only children
    /// that differ from *both* of their parents are. Pass-through parents,
    /// children identical to a parent, and the elitist carry-over are
    /// re-evaluated into each generation's fitness map but never charged
    /// or logged. Generation count is unbounded by design.
    pub fn run<F: ObjectiveFunction>(objective: &F, config: &GaConfig) -> Result<GaResult, GaError> {
        config.validate()?;
        let table = std::sync::Arc::new(config.scheme.build(config.interval)?);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            objective = objective.display_name(),
            encoding = table.name(),
            mode = %config.mode,
            population = config.population_size,
            budget = config.evaluation_budget,
            "starting genetic search"
        );

        let mode = config.mode;
        let popsize = config.population_size;
        let budget = config.evaluation_budget;
        let dim = objective.input_dimension();

        // Initial population.
        let mut population: Vec<Chromosome> = (0..popsize)
            .map(|_| Chromosome::random(&table, dim, &mut rng))
            .collect();
        if population.len() != popsize {
            return Err(GaError::InvariantViolation(format!(
                "initial population has {} members, expected {popsize}",
                population.len()
            )));
        }

        let mut log: Vec<f64> = Vec::with_capacity(budget);
        let mut evaluations = 0usize;
        let mut generations = 1usize;

        // Initial evaluation: every member is charged against the budget.
        let mut fitness = FitnessMap::with_capacity(popsize + 1);
        for chrom in &population {
            if evaluations >= budget {
                break;
            }
            let f = chrom.evaluate(objective)?;
            fitness.insert(chrom.clone(), f);
            log.push(f);
            evaluations += 1;
        }

        let (initial_best, mut best_fitness) = find_best(&population, &fitness, mode)
            .ok_or_else(|| GaError::InvariantViolation("no individual was evaluated".into()))?;
        let mut best = initial_best.clone();
        debug!(generation = generations, best = best_fitness, "initial population evaluated");

        while evaluations < budget {
            let f_prime = mode.scaling_reference(fitness.values().copied());

            // Reproduction: popsize/2 parent pairs.
            let mut children: Vec<Chromosome> = Vec::with_capacity(popsize + 1);
            let mut fresh: Vec<Chromosome> = Vec::with_capacity(popsize);
            for _ in 0..popsize / 2 {
                let (parent1, parent2) =
                    wheel_selection(&population, &fitness, f_prime, mode, &mut rng);

                let (mut child1, mut child2) =
                    if rng.random_range(0.0..1.0) < config.crossover_rate {
                        parent1.crossover(&parent2, &mut rng)
                    } else {
                        (parent1.clone(), parent2.clone())
                    };

                // Each child passes an independent Bernoulli gate before
                // the per-bit mutation pass; the gate probability and the
                // per-bit flip probability are the same configured rate,
                // drawn separately.
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    child1 = child1.mutate(config.mutation_rate, &mut rng);
                }
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    child2 = child2.mutate(config.mutation_rate, &mut rng);
                }

                for child in [child1, child2] {
                    if child != parent1 && child != parent2 {
                        fresh.push(child.clone());
                    }
                    children.push(child);
                }
            }

            // Elitist replacement: the previous generation's best survives
            // by value.
            let (elite, _) = find_best(&population, &fitness, mode)
                .ok_or_else(|| GaError::InvariantViolation("empty fitness map".into()))?;
            elitist_insert(&mut children, elite.clone());
            if children.len() != popsize && children.len() != popsize + 1 {
                return Err(GaError::InvariantViolation(format!(
                    "population has {} members after replacement, expected {popsize} or {}",
                    children.len(),
                    popsize + 1
                )));
            }

            population = children;

            // Rebuild the fitness map from scratch: every member is
            // evaluated, carry-overs and duplicates included.
            fitness = FitnessMap::with_capacity(population.len());
            for chrom in &population {
                let f = chrom.evaluate(objective)?;
                fitness.insert(chrom.clone(), f);
            }
            generations += 1;

            // Charge and record the genuinely new individuals, stopping
            // the moment the budget is hit.
            for child in &fresh {
                let f = fitness
                    .get(child)
                    .copied()
                    .expect("fitness map covers the whole population");
                log.push(f);
                evaluations += 1;
                if evaluations >= budget {
                    break;
                }
            }

            let (gen_best, gen_best_fitness) = find_best(&population, &fitness, mode)
                .ok_or_else(|| GaError::InvariantViolation("empty fitness map".into()))?;
            if mode.better(gen_best_fitness, best_fitness) {
                best = gen_best.clone();
                best_fitness = gen_best_fitness;
                debug!(generation = generations, best = best_fitness, "best fitness improved");
            }
        }

        info!(
            evaluations,
            generations,
            best = best_fitness,
            "genetic search complete"
        );

        Ok(GaResult {
            best_vector: best.decode(),
            best,
            best_fitness,
            generations,
            evaluations,
            log,
        })
    }
}

/// Appends the previous generation's best to the child population unless
/// an equal-by-value chromosome is already present, growing it by at most
/// one member.
fn elitist_insert(children: &mut Vec<Chromosome>, elite: Chromosome) {
    if !children.contains(&elite) {
        children.push(elite);
    }
}

/// The best-by-raw-fitness individual in population order (ties go to the
/// first encountered). Members missing from the map — possible only when
/// the budget truncated the initial evaluation — are skipped.
fn find_best<'a>(
    population: &'a [Chromosome],
    fitness: &FitnessMap,
    mode: Mode,
) -> Option<(&'a Chromosome, f64)> {
    let mut best: Option<(&Chromosome, f64)> = None;
    for chrom in population {
        let Some(&f) = fitness.get(chrom) else {
            continue;
        };
        match best {
            Some((_, best_f)) if !mode.better(f, best_f) => {}
            _ => best = Some((chrom, f)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Interval;
    use crate::ga::Scheme;
    use std::sync::Arc;

    struct Parabola;

    impl ObjectiveFunction for Parabola {
        fn evaluate(&self, input: &[f64]) -> f64 {
            input.iter().map(|x| x * x).sum()
        }
        fn input_dimension(&self) -> usize {
            1
        }
        fn display_name(&self) -> &str {
            "Parabola"
        }
    }

    struct Sum3;

    impl ObjectiveFunction for Sum3 {
        fn evaluate(&self, input: &[f64]) -> f64 {
            input.iter().sum()
        }
        fn input_dimension(&self) -> usize {
            3
        }
        fn display_name(&self) -> &str {
            "Sum"
        }
    }

    /// 512 grid points on 9 bits; the parabola's minimum (0.0) is on the
    /// grid.
    fn parabola_interval() -> Interval {
        Interval::new(-2.56, 2.55, 0.01).unwrap()
    }

    fn parabola_config() -> GaConfig {
        GaConfig::new(parabola_interval())
            .with_scheme(Scheme::Binary)
            .with_population_size(10)
            .with_mutation_rate(0.01)
            .with_crossover_rate(0.95)
            .with_evaluation_budget(500)
            .with_seed(42)
    }

    #[test]
    fn test_end_to_end_parabola_binary() {
        let result = GaRunner::run(&Parabola, &parabola_config()).unwrap();

        // The budget is respected exactly.
        assert_eq!(result.evaluations, 500);
        assert_eq!(result.log.len(), 500);

        // The running minimum is non-increasing; the reported best is at
        // least as good (the final generation's map may contain a best
        // individual whose recording the budget cut off).
        let mut running = f64::INFINITY;
        for &value in &result.log {
            let next = running.min(value);
            assert!(next <= running);
            running = next;
        }
        assert!(result.best_fitness <= running);

        // 500 evaluations on a 1-D parabola get close to the optimum.
        assert!(
            result.best_fitness < 0.1,
            "expected near-zero best, got {}",
            result.best_fitness
        );
        assert_eq!(result.best_vector.len(), 1);
        assert_eq!(
            Parabola.evaluate(&result.best_vector),
            result.best_fitness
        );
    }

    #[test]
    fn test_gray_encoding_converges_too() {
        let config = parabola_config().with_scheme(Scheme::Gray);
        let result = GaRunner::run(&Parabola, &config).unwrap();
        assert_eq!(result.log.len(), 500);
        assert!(
            result.best_fitness < 0.1,
            "expected near-zero best, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_log_never_exceeds_budget() {
        for budget in [3usize, 10, 57, 123] {
            let config = parabola_config().with_evaluation_budget(budget);
            let result = GaRunner::run(&Parabola, &config).unwrap();
            assert_eq!(result.evaluations, budget);
            assert_eq!(result.log.len(), budget);
        }
    }

    #[test]
    fn test_budget_smaller_than_population() {
        // The initial evaluation stops partway through the population.
        let config = parabola_config().with_evaluation_budget(4);
        let result = GaRunner::run(&Parabola, &config).unwrap();
        assert_eq!(result.evaluations, 4);
        assert_eq!(result.log.len(), 4);
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = GaRunner::run(&Parabola, &parabola_config()).unwrap();
        let b = GaRunner::run(&Parabola, &parabola_config()).unwrap();
        assert_eq!(a.log, b.log);
        assert_eq!(a.best, b.best);
        assert_eq!(a.generations, b.generations);
    }

    #[test]
    fn test_multidimensional_maximization() {
        // Maximizing the sum drives every component to the top of the
        // grid.
        let interval = Interval::new(0.0, 7.0, 1.0).unwrap();
        let config = GaConfig::new(interval)
            .with_scheme(Scheme::Gray)
            .with_population_size(10)
            .with_mutation_rate(0.05)
            .with_evaluation_budget(800)
            .with_mode(Mode::Maximize)
            .with_seed(7);
        let result = GaRunner::run(&Sum3, &config).unwrap();
        assert_eq!(result.best_vector.len(), 3);
        assert!(
            result.best_fitness >= 18.0,
            "expected near 21, got {}",
            result.best_fitness
        );
        let mut running = f64::NEG_INFINITY;
        for &value in &result.log {
            running = running.max(value);
        }
        assert!(result.best_fitness >= running);
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = parabola_config().with_population_size(9);
        assert!(matches!(
            GaRunner::run(&Parabola, &config),
            Err(GaError::Configuration(_))
        ));
    }

    #[test]
    fn test_mismatched_interval_rejected() {
        // 401 points cannot be covered by a power-of-two codeword set.
        let interval = Interval::new(-2.0, 2.0, 0.01).unwrap();
        let config = GaConfig::new(interval).with_seed(42);
        assert!(matches!(
            GaRunner::run(&Parabola, &config),
            Err(GaError::Encoding(_))
        ));
    }

    #[test]
    fn test_write_log_format() {
        let config = parabola_config().with_evaluation_budget(25);
        let result = GaRunner::run(&Parabola, &config).unwrap();
        let mut buffer = Vec::new();
        result.write_log(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 25);
        for (line, &value) in lines.iter().zip(&result.log) {
            assert_eq!(line.parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_elitist_insert_appends_missing_best() {
        let interval = Interval::new(0.0, 7.0, 1.0).unwrap();
        let table = Arc::new(crate::encoding::EncodingTable::binary(interval).unwrap());
        let elite = Chromosome::from_vector(&table, &[0.0]).unwrap();
        let mut children = vec![
            Chromosome::from_vector(&table, &[3.0]).unwrap(),
            Chromosome::from_vector(&table, &[5.0]).unwrap(),
        ];

        elitist_insert(&mut children, elite.clone());
        assert_eq!(children.len(), 3);
        assert!(children.contains(&elite));
    }

    #[test]
    fn test_elitist_insert_respects_presence_by_value() {
        let interval = Interval::new(0.0, 7.0, 1.0).unwrap();
        let table = Arc::new(crate::encoding::EncodingTable::binary(interval).unwrap());
        let elite = Chromosome::from_vector(&table, &[0.0]).unwrap();
        // A distinct instance with the same bits already sits in the
        // children: no growth.
        let twin = Chromosome::from_bits(&table, elite.bits()).unwrap();
        let mut children = vec![twin, Chromosome::from_vector(&table, &[5.0]).unwrap()];

        elitist_insert(&mut children, elite.clone());
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_find_best_first_encountered_tie_break() {
        let interval = Interval::new(0.0, 7.0, 1.0).unwrap();
        let table = Arc::new(crate::encoding::EncodingTable::binary(interval).unwrap());
        let a = Chromosome::from_vector(&table, &[1.0]).unwrap();
        let b = Chromosome::from_vector(&table, &[2.0]).unwrap();
        let population = vec![a.clone(), b.clone()];
        let mut fitness = FitnessMap::new();
        fitness.insert(a.clone(), 3.0);
        fitness.insert(b.clone(), 3.0);

        let (winner, f) = find_best(&population, &fitness, Mode::Minimize).unwrap();
        assert_eq!(*winner, a);
        assert_eq!(f, 3.0);
    }

    #[test]
    fn test_elite_survives_with_heavy_mutation() {
        // Mutation rate 1.0 complements every gated child, so the only
        // way the best genotype persists is the elitist carry-over; with
        // a deterministic objective the reported best can never be worse
        // than any value logged.
        let config = parabola_config()
            .with_mutation_rate(1.0)
            .with_crossover_rate(0.5)
            .with_evaluation_budget(300);
        let result = GaRunner::run(&Parabola, &config).unwrap();
        let log_min = result.log.iter().copied().fold(f64::INFINITY, f64::min);
        assert!(result.best_fitness <= log_min);
    }
}
