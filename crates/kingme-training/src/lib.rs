//! Genetic optimization of evaluator weights.
//!
//! The weights consumed by [`FeatureEvaluator`](kingme_evaluator::evaluator::FeatureEvaluator)
//! are tuned offline by a genetic algorithm. Each individual is a
//! [`WeightVector`](kingme_evaluator::weights::WeightVector); its fitness comes from games
//! it plays with the hybrid strategy against a fixed material-only opponent.
//!
//! # How Training Works
//!
//! 1. **Population** - random weight vectors, L1-normalized
//! 2. **Fitness** - each individual plays a fixed set of seeded games ([`fitness`])
//! 3. **Selection** - elites survive, parents are drawn by tournament
//! 4. **Reproduction** - BLX-α crossover and Gaussian mutation ([`weights`])
//! 5. **Repeat** - for a fixed number of generations, remembering the best individual seen
//!
//! # Architecture
//!
//! ```text
//! GeneticOptimizer
//!     ↓ evolves
//! Population of WeightVectors
//!     ↓ scored by
//! FitnessEvaluator (MatchFitness: hybrid vs. alpha-beta matches)
//!     ↓ produces
//! OptimizationReport (best individual + per-generation summaries)
//! ```
//!
//! All randomness is drawn from a caller-supplied RNG, and match openings are derived from a
//! fixed seed, so a run is reproducible from its seed alone.
//!
//! # Example
//!
//! ```no_run
//! let weights = kingme_training::genetic::optimize(12, 20, 0.2);
//! assert_eq!(weights.len(), kingme_evaluator::board_feature::BoardFeature::ALL.len());
//! ```
//!
//! # Current Limitations
//!
//! - **No diversity maintenance**: a population that collapses to a single point is only
//!   reported, never perturbed
//! - **Fixed opponent**: fitness is measured against the default material evaluator, so
//!   tuned weights are not pitted against each other

pub mod fitness;
pub mod genetic;
pub mod weights;
