//! Genetic algorithm over evaluator weight vectors.
//!
//! Each generation:
//!
//! 1. **Evaluate** - every individual is scored by a [`FitnessEvaluator`], in parallel
//! 2. **Elitism** - the top `elite_count` individuals carry over unchanged
//! 3. **Tournament selection** - parents are the fittest of `tournament_size` random picks
//! 4. **Crossover** - BLX-α between the two parents
//! 5. **Mutation** - Gaussian noise per coefficient with probability `mutation_rate`
//! 6. **Normalization** - L1, so every vector sums to 1.0
//!
//! [`GeneticOptimizer`] runs this loop for a fixed number of generations and reports the best
//! individual seen in any generation, since an unlucky mutation round can lower the best
//! fitness of a later population.
//!
//! # Example
//!
//! ```
//! use kingme_evaluator::weights::WeightVector;
//! use kingme_training::{fitness::FitnessEvaluator, genetic::GeneticOptimizer};
//! use rand::SeedableRng as _;
//!
//! #[derive(Debug)]
//! struct PreferKings;
//!
//! impl FitnessEvaluator for PreferKings {
//!     fn evaluate(&self, weights: &WeightVector) -> f32 {
//!         weights.as_slice()[1]
//!     }
//! }
//!
//! let optimizer = GeneticOptimizer::new(10, 5, PreferKings);
//! let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(42);
//! let report = optimizer.run(&mut rng);
//! assert_eq!(report.generations.len(), 5);
//! ```

use std::thread;

use kingme_evaluator::{board_feature::BoardFeature, weights::WeightVector};
use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::{
    fitness::{FitnessEvaluator, MatchFitness},
    weights,
};

/// Seed used by [`optimize`].
pub const DEFAULT_SEED: u64 = 0x6b69_6e67_6d65;

/// One candidate weight vector and its fitness in the current generation.
#[derive(Debug, Clone)]
pub struct Individual {
    weights: WeightVector,
    fitness: f32,
}

impl Individual {
    /// Random coefficients in `[0, max_weight]`, L1-normalized.
    pub fn random<R>(rng: &mut R, max_weight: f32, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut weights = weights::random(rng, max_weight, len);
        weights::normalize_l1(&mut weights);
        Self::unevaluated(weights.into())
    }

    fn unevaluated(weights: WeightVector) -> Self {
        Self {
            weights,
            fitness: f32::MIN,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Fitness from the last evaluation, or `f32::MIN` if not yet evaluated.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }
}

/// A generation of individuals.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[must_use]
    pub fn random<R>(count: usize, len: usize, rng: &mut R, max_weight: f32) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(count > 0, "population must not be empty");
        let individuals = (0..count)
            .map(|_| Individual::random(rng, max_weight, len))
            .collect();
        Self { individuals }
    }

    /// Individuals, best first once [`evaluate_fitness`](Self::evaluate_fitness) has run.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn best(&self) -> &Individual {
        &self.individuals[0]
    }

    /// Scores every individual on its own thread, then sorts by fitness descending.
    pub fn evaluate_fitness<E>(&mut self, evaluator: &E)
    where
        E: FitnessEvaluator + ?Sized,
    {
        thread::scope(|s| {
            for ind in &mut self.individuals {
                s.spawn(move || {
                    ind.fitness = evaluator.evaluate(&ind.weights);
                });
            }
        });

        // sort by fitness descending
        self.individuals
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    /// Whether two or more individuals all carry bit-identical weights.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        let first = &self.individuals[0].weights;
        self.individuals.len() > 1
            && self.individuals[1..]
                .iter()
                .all(|ind| ind.weights.bit_eq(first))
    }

    #[expect(clippy::cast_precision_loss)]
    fn summarize(&self, generation: usize) -> GenerationSummary {
        let fitness = self.individuals.iter().map(Individual::fitness);
        let sum: f32 = fitness.clone().sum();
        GenerationSummary {
            generation,
            best_fitness: fitness.clone().fold(f32::MIN, f32::max),
            mean_fitness: sum / self.individuals.len() as f32,
            worst_fitness: fitness.fold(f32::MAX, f32::min),
            best_weights: self.best().weights.clone(),
            collapsed: self.is_collapsed(),
        }
    }
}

/// Parameters for producing the next generation.
#[derive(Debug, Clone, Copy)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged
    pub elite_count: usize,
    /// Coefficients are clamped to `[0, max_weight]`
    pub max_weight: f32,
    /// Individuals drawn per tournament
    pub tournament_size: usize,
    /// Standard deviation of the Gaussian mutation
    pub mutation_sigma: f32,
    /// BLX-α range expansion
    pub blx_alpha: f32,
    /// Probability of mutating each coefficient
    pub mutation_rate: f32,
}

impl Default for PopulationEvolver {
    fn default() -> Self {
        Self {
            elite_count: 2,
            max_weight: 1.0,
            tournament_size: 2,
            mutation_sigma: 0.05,
            blx_alpha: 0.2,
            mutation_rate: 0.2,
        }
    }
}

impl PopulationEvolver {
    /// Builds the next generation from an evaluated population of the same size.
    ///
    /// # Panics
    ///
    /// Panics if `population` is not sorted by fitness descending.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let individuals = &population.individuals;
        assert!(individuals.is_sorted_by(|a, b| a.fitness >= b.fitness));

        let elite_count = self.elite_count.min(individuals.len());
        let mut next = individuals[..elite_count].to_vec();

        while next.len() < individuals.len() {
            let p1 = tournament_select(individuals, self.tournament_size, rng);
            let p2 = tournament_select(individuals, self.tournament_size, rng);

            let mut child = weights::blx_alpha(
                p1.weights.as_slice(),
                p2.weights.as_slice(),
                self.blx_alpha,
                self.max_weight,
                rng,
            );
            weights::mutate(
                &mut child,
                self.mutation_sigma,
                self.max_weight,
                self.mutation_rate,
                rng,
            );
            weights::normalize_l1(&mut child);

            next.push(Individual::unevaluated(child.into()));
        }

        Population { individuals: next }
    }
}

/// Returns the fittest of `tournament_size` distinct random individuals.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    population
        .choose_multiple(rng, tournament_size)
        .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .expect("population must not be empty")
}

/// Statistics of one evaluated generation.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub generation: usize,
    pub best_fitness: f32,
    pub mean_fitness: f32,
    pub worst_fitness: f32,
    pub best_weights: WeightVector,
    /// Every individual had identical weights.
    pub collapsed: bool,
}

/// Result of a [`GeneticOptimizer`] run.
#[derive(Debug, Clone)]
pub struct OptimizationReport {
    /// Fittest individual seen in any generation.
    pub best: Individual,
    pub generations: Vec<GenerationSummary>,
}

/// A complete optimization run configuration.
#[derive(Debug, Clone)]
pub struct GeneticOptimizer<F> {
    pub population_size: usize,
    pub generations: usize,
    /// Upper bound of the initial random coefficients
    pub initial_max_weight: f32,
    pub evolver: PopulationEvolver,
    pub fitness: F,
}

impl<F> GeneticOptimizer<F>
where
    F: FitnessEvaluator,
{
    #[must_use]
    pub fn new(population_size: usize, generations: usize, fitness: F) -> Self {
        Self {
            population_size,
            generations,
            initial_max_weight: 1.0,
            evolver: PopulationEvolver::default(),
            fitness,
        }
    }

    /// Runs with the same [`PopulationEvolver`] for every generation.
    pub fn run<R>(&self, rng: &mut R) -> OptimizationReport
    where
        R: Rng + ?Sized,
    {
        self.run_with_schedule(rng, |_| self.evolver)
    }

    /// Runs with the evolver returned by `schedule(generation)` for each generation.
    ///
    /// # Panics
    ///
    /// Panics if `population_size` or `generations` is zero.
    pub fn run_with_schedule<R, S>(&self, rng: &mut R, mut schedule: S) -> OptimizationReport
    where
        R: Rng + ?Sized,
        S: FnMut(usize) -> PopulationEvolver,
    {
        assert!(self.generations > 0, "at least one generation is required");

        let feature_count = BoardFeature::ALL.len();
        let mut population = Population::random(
            self.population_size,
            feature_count,
            rng,
            self.initial_max_weight,
        );
        let mut best: Option<Individual> = None;
        let mut generations = Vec::with_capacity(self.generations);

        for generation in 0..self.generations {
            population.evaluate_fitness(&self.fitness);

            let summary = population.summarize(generation);
            tracing::info!(
                generation,
                best = summary.best_fitness,
                mean = summary.mean_fitness,
                worst = summary.worst_fitness,
                weights = ?summary.best_weights.as_slice(),
                "generation evaluated"
            );
            if summary.collapsed {
                tracing::warn!(
                    generation,
                    "population collapsed to identical weights; search is stuck at one point"
                );
            }
            generations.push(summary);

            let candidate = population.best();
            if best
                .as_ref()
                .is_none_or(|b| candidate.fitness > b.fitness)
            {
                best = Some(candidate.clone());
            }

            if generation + 1 < self.generations {
                population = schedule(generation).evolve(&population, rng);
            }
        }

        OptimizationReport {
            best: best.unwrap_or_else(|| population.best().clone()),
            generations,
        }
    }
}

/// Optimizes weights with [`MatchFitness::default`], the default evolver and [`DEFAULT_SEED`].
///
/// # Panics
///
/// Panics if `population_size` or `generations` is zero.
#[must_use]
pub fn optimize(population_size: usize, generations: usize, mutation_rate: f32) -> WeightVector {
    let mut optimizer =
        GeneticOptimizer::new(population_size, generations, MatchFitness::default());
    optimizer.evolver.mutation_rate = mutation_rate;
    let mut rng = Pcg64Mcg::seed_from_u64(DEFAULT_SEED);
    optimizer.run(&mut rng).best.weights
}
