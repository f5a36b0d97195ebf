use std::path::PathBuf;

use kingme_training::{
    fitness::MatchFitness,
    genetic::{GeneticOptimizer, PopulationEvolver},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use crate::{model::ai_model::AiModel, util};

const ELITE_COUNT: usize = 2;
const TOURNAMENT_SIZE: usize = 3;
const BLX_ALPHA: f32 = 0.2;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
enum EvolutionPhase {
    #[default]
    Exploration,
    Transition,
    Convergence,
}

impl EvolutionPhase {
    fn from_progress(generation: usize, generations: usize) -> Self {
        match generation * 10 / generations.max(1) {
            0..3 => Self::Exploration,
            3..7 => Self::Transition,
            _ => Self::Convergence,
        }
    }

    const fn max_weight(self) -> f32 {
        match self {
            Self::Exploration => 0.5,
            Self::Transition => 0.8,
            Self::Convergence => 1.0,
        }
    }

    const fn mutation_sigma(self) -> f32 {
        match self {
            Self::Exploration => 0.05,
            Self::Transition => 0.02,
            Self::Convergence => 0.01,
        }
    }

    const fn evolver(self, mutation_rate: f32) -> PopulationEvolver {
        PopulationEvolver {
            elite_count: ELITE_COUNT,
            max_weight: self.max_weight(),
            tournament_size: TOURNAMENT_SIZE,
            mutation_sigma: self.mutation_sigma(),
            blx_alpha: BLX_ALPHA,
            mutation_rate,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainAiArg {
    /// Individuals per generation
    #[arg(long, default_value_t = 20)]
    population: usize,
    /// Number of generations
    #[arg(long, default_value_t = 40)]
    generations: usize,
    /// Probability of mutating each coefficient
    #[arg(long, default_value_t = 0.2)]
    mutation_rate: f32,
    /// Search depth used in fitness games
    #[arg(long, default_value_t = 2)]
    depth: u32,
    /// Fitness games per individual
    #[arg(long, default_value_t = 4)]
    games: usize,
    /// Plies before a fitness game is scored as a draw
    #[arg(long, default_value_t = 120)]
    ply_limit: usize,
    /// Random plies played before each fitness game
    #[arg(long, default_value_t = 4)]
    opening_plies: usize,
    /// Seed for the population and the openings
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Model name stored in the output
    #[arg(long, default_value = "expert")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainAiArg) -> anyhow::Result<()> {
    let TrainAiArg {
        population,
        generations,
        mutation_rate,
        depth,
        games,
        ply_limit,
        opening_plies,
        seed,
        name,
        output,
    } = arg;
    anyhow::ensure!(*population > 0, "--population must be positive");
    anyhow::ensure!(*generations > 0, "--generations must be positive");
    anyhow::ensure!(*games > 0, "--games must be positive");
    anyhow::ensure!(
        (0.0..=1.0).contains(mutation_rate),
        "--mutation-rate must be within 0..=1"
    );

    let fitness = MatchFitness {
        depth: *depth,
        games: *games,
        ply_limit: *ply_limit,
        opening_plies: *opening_plies,
        seed: *seed,
    };
    let optimizer = GeneticOptimizer {
        population_size: *population,
        generations: *generations,
        initial_max_weight: EvolutionPhase::default().max_weight(),
        evolver: EvolutionPhase::default().evolver(*mutation_rate),
        fitness,
    };

    let mut rng = Pcg64Mcg::seed_from_u64(*seed);
    let report = optimizer.run_with_schedule(&mut rng, |generation| {
        let phase = EvolutionPhase::from_progress(generation, *generations);
        tracing::debug!(generation, ?phase, "evolving");
        phase.evolver(*mutation_rate)
    });

    let collapsed = report.generations.iter().filter(|g| g.collapsed).count();
    if collapsed > 0 {
        tracing::warn!(collapsed, "generations ended with a collapsed population");
    }

    let best = &report.best;
    tracing::info!(
        fitness = best.fitness(),
        weights = ?best.weights().as_slice(),
        "training completed"
    );

    let model = AiModel::new(name.clone(), best.fitness(), best.weights());
    util::save_json(&model, output.as_deref())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {:.3}", model.final_fitness);
    eprintln!("  Weights: {} features", model.weights.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_follow_progress() {
        let phases = (0..10)
            .map(|g| EvolutionPhase::from_progress(g, 10))
            .collect::<Vec<_>>();
        assert_eq!(phases[0], EvolutionPhase::Exploration);
        assert_eq!(phases[2], EvolutionPhase::Exploration);
        assert_eq!(phases[3], EvolutionPhase::Transition);
        assert_eq!(phases[6], EvolutionPhase::Transition);
        assert_eq!(phases[7], EvolutionPhase::Convergence);
        assert_eq!(phases[9], EvolutionPhase::Convergence);
    }

    #[test]
    fn test_phase_evolver() {
        let evolver = EvolutionPhase::Convergence.evolver(0.3);
        assert_eq!(evolver.max_weight, 1.0);
        assert_eq!(evolver.mutation_rate, 0.3);
        assert_eq!(evolver.elite_count, ELITE_COUNT);
    }
}
