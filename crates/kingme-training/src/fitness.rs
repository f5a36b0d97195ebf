//! Fitness functions for weight vectors.
//!
//! Fitness is a pure function of one individual: the same weights always receive the same
//! score, regardless of the rest of the population.

use std::fmt;

use kingme_engine::{Board, Color, simulate};
use kingme_evaluator::{
    board_feature::BoardFeature,
    match_play::{MatchOutcome, play_match},
    strategy::{AlphaBetaSelector, HybridSelector, MoveSelector},
    weights::WeightVector,
};
use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64Mcg;

/// Scores a weight vector. Higher is better.
pub trait FitnessEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, weights: &WeightVector) -> f32;
}

const WIN_SCORE: f32 = 1.0;
const LOSS_SCORE: f32 = -1.0;
const MATERIAL_SCALE: f32 = 0.1;
const KING_VALUE: f32 = 1.5;

/// Fitness from matches against the default material evaluator.
///
/// The individual plays `games` matches with the hybrid strategy at `depth`, taking White in
/// even-numbered games and Red in odd-numbered ones. Each match starts from a position reached
/// by `opening_plies` random plies drawn from `seed`, so every individual faces the same set
/// of openings.
///
/// A game scores +1 for a win, -1 for a loss and 0 for a draw at `ply_limit`, plus 0.1 times
/// the final material differential (men count 1, kings 1.5). The fitness is the mean over
/// all games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFitness {
    pub depth: u32,
    pub games: usize,
    pub ply_limit: usize,
    pub opening_plies: usize,
    pub seed: u64,
}

impl Default for MatchFitness {
    fn default() -> Self {
        Self {
            depth: 2,
            games: 4,
            ply_limit: 120,
            opening_plies: 4,
            seed: 0,
        }
    }
}

impl MatchFitness {
    /// Starting position and side to move for game number `game`.
    #[must_use]
    pub fn opening(&self, game: usize) -> (Board, Color) {
        let mut rng = Pcg64Mcg::seed_from_u64(self.seed.wrapping_add(game as u64));
        let mut board = Board::initial();
        let mut turn = Color::Red;
        for _ in 0..self.opening_plies {
            let moves = board.all_moves(turn).collect::<Vec<_>>();
            let Some((piece, mv)) = moves.choose(&mut rng) else {
                break;
            };
            board = simulate(&board, *piece, mv);
            turn = turn.opponent();
        }
        (board, turn)
    }

    /// Plays game number `game` for the individual with `weights`.
    #[must_use]
    pub fn play(&self, weights: &WeightVector, game: usize) -> (Color, MatchOutcome) {
        let me = if game % 2 == 0 {
            Color::White
        } else {
            Color::Red
        };
        let tuned = HybridSelector::new(self.depth, weights.clone());
        let baseline = AlphaBetaSelector::new(self.depth);
        let (white, red): (&dyn MoveSelector, &dyn MoveSelector) = match me {
            Color::White => (&tuned, &baseline),
            Color::Red => (&baseline, &tuned),
        };
        let (board, first) = self.opening(game);
        (me, play_match(white, red, board, first, self.ply_limit))
    }
}

impl FitnessEvaluator for MatchFitness {
    fn evaluate(&self, weights: &WeightVector) -> f32 {
        assert!(self.games > 0, "at least one game is required");
        let total: f32 = (0..self.games)
            .map(|game| {
                let (me, outcome) = self.play(weights, game);
                game_score(me, &outcome)
            })
            .sum();
        #[expect(clippy::cast_precision_loss)]
        let games = self.games as f32;
        total / games
    }
}

fn game_score(me: Color, outcome: &MatchOutcome) -> f32 {
    let result = match outcome.winner {
        Some(winner) if winner == me => WIN_SCORE,
        Some(_) => LOSS_SCORE,
        None => 0.0,
    };
    let material = BoardFeature::Men.compute(&outcome.board, me)
        + KING_VALUE * BoardFeature::Kings.compute(&outcome.board, me);
    result + MATERIAL_SCALE * material
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> MatchFitness {
        MatchFitness {
            depth: 1,
            games: 2,
            ply_limit: 16,
            opening_plies: 2,
            seed: 11,
        }
    }

    #[test]
    fn test_openings_are_reproducible() {
        let fitness = quick();
        assert_eq!(fitness.opening(0), fitness.opening(0));
        let (board, turn) = fitness.opening(1);
        assert_eq!(turn, Color::Red);
        assert_ne!(board, Board::initial());
    }

    #[test]
    fn test_colors_alternate() {
        let fitness = quick();
        let weights = WeightVector::default();
        assert_eq!(fitness.play(&weights, 0).0, Color::White);
        assert_eq!(fitness.play(&weights, 1).0, Color::Red);
    }

    #[test]
    fn test_fitness_is_pure() {
        let fitness = quick();
        let weights = WeightVector::new(vec![0.2, 0.3, 0.1, 0.1, 0.2, 0.1]);
        let a = fitness.evaluate(&weights);
        let b = fitness.evaluate(&weights);
        assert_eq!(a.to_bits(), b.to_bits());
        // win/loss plus at most a full set of kings in material
        assert!(a.abs() <= WIN_SCORE + MATERIAL_SCALE * 12.0 * KING_VALUE);
    }

    #[test]
    fn test_game_score() {
        let board: Board = "........
                            ........
                            ...w....
                            ........
                            ........
                            ..W.....
                            ........
                            ........"
            .parse()
            .unwrap();
        let outcome = MatchOutcome {
            winner: Some(Color::White),
            board,
            plies: 9,
        };
        assert!((game_score(Color::White, &outcome) - 1.25).abs() < 1e-6);
        assert!((game_score(Color::Red, &outcome) + 1.25).abs() < 1e-6);

        let draw = MatchOutcome {
            winner: None,
            ..outcome
        };
        assert!((game_score(Color::White, &draw) - 0.25).abs() < 1e-6);
    }
}
