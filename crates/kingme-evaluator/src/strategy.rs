//! Pluggable move selectors and difficulty tiers.
//!
//! A [`MoveSelector`] receives the current board and the side it plays, and returns the
//! board after its chosen move. Every search-based selector checks for a finished game
//! before searching, so a terminal position is never expanded.
//!
//! A [`Difficulty`] tier maps to an `(algorithm, depth)` pair:
//!
//! | tier     | algorithm  | depth |
//! |----------|------------|-------|
//! | `easy`   | minimax    | 2     |
//! | `medium` | alpha-beta | 3     |
//! | `hard`   | alpha-beta | 4     |
//! | `expert` | hybrid     | 5     |
//! | `fuzzy`  | fuzzy      | -     |

use std::fmt;

use kingme_engine::{Board, Color, simulate};

use crate::{
    evaluator::MaterialEvaluator,
    fuzzy,
    hybrid::HybridSearch,
    search::Search,
    weights::WeightVector,
};

/// Chooses a move for one side.
pub trait MoveSelector: fmt::Debug + Send + Sync {
    /// Returns the board after `player`'s chosen move, or `None` if the game is over.
    fn select(&self, board: &Board, player: Color) -> Option<Board>;
}

/// Minimax over the static material evaluator.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxSelector {
    depth: u32,
}

impl MinimaxSelector {
    #[must_use]
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
        }
    }
}

impl MoveSelector for MinimaxSelector {
    fn select(&self, board: &Board, player: Color) -> Option<Board> {
        if board.winner(player).is_some() {
            return None;
        }
        let search = Search::new(&MaterialEvaluator, player);
        let result = search.minimax(board, self.depth, true);
        tracing::debug!(
            depth = self.depth,
            nodes = search.nodes(),
            score = result.score,
            "minimax"
        );
        Some(result.board)
    }
}

/// Alpha-beta over the static material evaluator.
#[derive(Debug, Clone, Copy)]
pub struct AlphaBetaSelector {
    depth: u32,
}

impl AlphaBetaSelector {
    #[must_use]
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
        }
    }
}

impl MoveSelector for AlphaBetaSelector {
    fn select(&self, board: &Board, player: Color) -> Option<Board> {
        if board.winner(player).is_some() {
            return None;
        }
        let search = Search::new(&MaterialEvaluator, player);
        let result = search.alpha_beta(board, self.depth, f32::NEG_INFINITY, f32::INFINITY, true);
        tracing::debug!(
            depth = self.depth,
            nodes = search.nodes(),
            score = result.score,
            "alpha-beta"
        );
        Some(result.board)
    }
}

/// Alpha-beta over tuned weights.
#[derive(Debug, Clone)]
pub struct HybridSelector {
    depth: u32,
    search: HybridSearch,
}

impl HybridSelector {
    #[must_use]
    pub fn new(depth: u32, weights: WeightVector) -> Self {
        Self {
            depth: depth.max(1),
            search: HybridSearch::new(weights),
        }
    }
}

impl MoveSelector for HybridSelector {
    fn select(&self, board: &Board, player: Color) -> Option<Board> {
        if board.winner(player).is_some() {
            return None;
        }
        let result = self.search.search(
            board,
            self.depth,
            f32::NEG_INFINITY,
            f32::INFINITY,
            true,
            player,
        );
        Some(result.board)
    }
}

/// Plays the first legal move of the piece the fuzzy controller likes best.
///
/// If the favored piece cannot move, the first piece that can is used instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzySelector;

impl MoveSelector for FuzzySelector {
    fn select(&self, board: &Board, player: Color) -> Option<Board> {
        if board.winner(player).is_some() {
            return None;
        }
        let favored = fuzzy::pick_move(board, player).and_then(|square| board.piece_at(square));
        let (piece, mv) = favored
            .and_then(|piece| board.valid_moves(piece).first().map(|mv| (piece, mv.clone())))
            .or_else(|| board.all_moves(player).next())?;
        Some(simulate(board, piece, &mv))
    }
}

/// Search algorithm behind a difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Algorithm {
    #[display("minimax")]
    Minimax,
    #[display("alpha-beta")]
    AlphaBeta,
    #[display("hybrid")]
    Hybrid,
    #[display("fuzzy")]
    Fuzzy,
}

/// Human-facing difficulty tier.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr)]
pub enum Difficulty {
    #[display("easy")]
    Easy,
    #[default]
    #[display("medium")]
    Medium,
    #[display("hard")]
    Hard,
    #[display("expert")]
    Expert,
    #[display("fuzzy")]
    Fuzzy,
}

/// Algorithm and search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyConfig {
    pub algorithm: Algorithm,
    pub depth: u32,
}

impl Difficulty {
    #[must_use]
    pub const fn config(self) -> StrategyConfig {
        let (algorithm, depth) = match self {
            Self::Easy => (Algorithm::Minimax, 2),
            Self::Medium => (Algorithm::AlphaBeta, 3),
            Self::Hard => (Algorithm::AlphaBeta, 4),
            Self::Expert => (Algorithm::Hybrid, 5),
            Self::Fuzzy => (Algorithm::Fuzzy, 0),
        };
        StrategyConfig { algorithm, depth }
    }
}

impl StrategyConfig {
    /// Builds the selector. The hybrid algorithm uses `weights`, falling back to the
    /// default coefficients when none are given.
    #[must_use]
    pub fn build(self, weights: Option<WeightVector>) -> Box<dyn MoveSelector> {
        match self.algorithm {
            Algorithm::Minimax => Box::new(MinimaxSelector::new(self.depth)),
            Algorithm::AlphaBeta => Box::new(AlphaBetaSelector::new(self.depth)),
            Algorithm::Hybrid => {
                let weights = weights.unwrap_or_else(|| {
                    tracing::warn!(
                        "no tuned weights given; hybrid search uses default coefficients"
                    );
                    WeightVector::default()
                });
                Box::new(HybridSelector::new(self.depth, weights))
            }
            Algorithm::Fuzzy => Box::new(FuzzySelector),
        }
    }
}

#[cfg(test)]
mod tests {
    use kingme_engine::Square;

    use super::*;

    fn blocked_red() -> Board {
        "........
         ........
         ........
         ........
         ........
         ..w.....
         .w......
         r......."
            .parse()
            .unwrap()
    }

    #[test]
    fn test_difficulty_parses() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("expert".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(
            Difficulty::Hard.config(),
            StrategyConfig {
                algorithm: Algorithm::AlphaBeta,
                depth: 4
            }
        );
    }

    #[test]
    fn test_selectors_make_a_legal_move() {
        let board = Board::initial();
        for difficulty in [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Expert,
            Difficulty::Fuzzy,
        ] {
            let mut config = difficulty.config();
            config.depth = config.depth.min(3);
            let selector = config.build(None);
            let next = selector.select(&board, Color::White).unwrap();
            let successors: Vec<Board> = board
                .all_moves(Color::White)
                .map(|(piece, mv)| simulate(&board, piece, &mv))
                .collect();
            assert!(successors.contains(&next), "{difficulty}");
        }
    }

    #[test]
    fn test_selectors_refuse_finished_games() {
        let board = blocked_red();
        for difficulty in [
            Difficulty::Easy,
            Difficulty::Hard,
            Difficulty::Expert,
            Difficulty::Fuzzy,
        ] {
            let selector = difficulty.config().build(Some(WeightVector::default()));
            assert_eq!(selector.select(&board, Color::Red), None, "{difficulty}");
        }
    }

    #[test]
    fn test_fuzzy_falls_back_to_movable_piece() {
        // Both men rate the same, so (6, 1) is favored, but it is blocked.
        let board: Board = "........
                            ........
                            ........
                            ........
                            ........
                            ........
                            .w...w..
                            r.r....."
            .parse()
            .unwrap();
        assert_eq!(
            fuzzy::pick_move(&board, Color::White),
            Some(Square::new(6, 1))
        );
        let next = FuzzySelector.select(&board, Color::White).unwrap();
        assert!(next.piece_at(Square::new(6, 5)).is_none());
        assert_eq!(next.piece_count(Color::White), 2);
    }
}
