//! Adversarial search over simulated boards.
//!
//! Both algorithms walk the same tree: each node is a board, each edge one move of the
//! side to move, expanded with [`kingme_engine::simulate`] so every node owns its board.
//! The maximizing side is the search's `player`; the minimizing side is its opponent.
//!
//! - [`Search::minimax`] visits the full tree to `depth` plies
//! - [`Search::alpha_beta`] prunes siblings once `beta <= alpha`; it returns the same best
//!   score as minimax for the same inputs, only visiting fewer nodes
//!
//! A node is a leaf when `depth` is zero or the side to move has lost (no pieces or no
//! legal move). Leaves return their static evaluation and the leaf board itself.
//!
//! Ties are broken in favor of the first child reaching the extreme score, in the
//! deterministic order of [`Board::all_moves`].
//!
//! There is no time budget, iterative deepening, or cancellation: latency grows with
//! `branching_factor^depth`, so callers pick `depth` conservatively.

use std::cell::Cell;

use kingme_engine::{Board, Color, simulate};

use crate::evaluator::Evaluator;

/// Best reachable score and the child board that leads to it.
///
/// For a leaf, `board` is the leaf itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub score: f32,
    pub board: Board,
}

/// A search bound to one evaluator and one maximizing side.
#[derive(Debug)]
pub struct Search<'a> {
    evaluator: &'a dyn Evaluator,
    player: Color,
    nodes: Cell<u64>,
}

impl<'a> Search<'a> {
    #[must_use]
    pub fn new(evaluator: &'a dyn Evaluator, player: Color) -> Self {
        Self {
            evaluator,
            player,
            nodes: Cell::new(0),
        }
    }

    /// The maximizing side.
    #[must_use]
    pub fn player(&self) -> Color {
        self.player
    }

    /// Number of nodes visited since this search was created.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes.get()
    }

    /// Plain minimax to `depth` plies.
    #[must_use]
    pub fn minimax(&self, board: &Board, depth: u32, maximizing: bool) -> SearchResult {
        let to_move = self.side_to_move(maximizing);
        if let Some(leaf) = self.leaf(board, depth, to_move) {
            return leaf;
        }

        let mut best: Option<SearchResult> = None;
        for child in children(board, to_move) {
            let score = self.minimax(&child, depth - 1, !maximizing).score;
            if best
                .as_ref()
                .is_none_or(|b| improves(score, b.score, maximizing))
            {
                best = Some(SearchResult {
                    score,
                    board: child,
                });
            }
        }
        best.unwrap_or_else(|| self.evaluate(board))
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `alpha` is the score the maximizing side can already guarantee, `beta` the score the
    /// minimizing side can already guarantee. Call with `(-∞, +∞)` at the root.
    #[must_use]
    pub fn alpha_beta(
        &self,
        board: &Board,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
    ) -> SearchResult {
        let to_move = self.side_to_move(maximizing);
        if let Some(leaf) = self.leaf(board, depth, to_move) {
            return leaf;
        }

        let mut best: Option<SearchResult> = None;
        for child in children(board, to_move) {
            let score = self
                .alpha_beta(&child, depth - 1, alpha, beta, !maximizing)
                .score;
            if best
                .as_ref()
                .is_none_or(|b| improves(score, b.score, maximizing))
            {
                best = Some(SearchResult {
                    score,
                    board: child,
                });
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        best.unwrap_or_else(|| self.evaluate(board))
    }

    fn side_to_move(&self, maximizing: bool) -> Color {
        if maximizing {
            self.player
        } else {
            self.player.opponent()
        }
    }

    /// Counts the node and returns its static result if it is a leaf.
    fn leaf(&self, board: &Board, depth: u32, to_move: Color) -> Option<SearchResult> {
        self.nodes.set(self.nodes.get() + 1);
        (depth == 0 || board.winner(to_move).is_some()).then(|| self.evaluate(board))
    }

    fn evaluate(&self, board: &Board) -> SearchResult {
        SearchResult {
            score: self.evaluator.evaluate(board, self.player),
            board: board.clone(),
        }
    }
}

fn children(board: &Board, to_move: Color) -> impl Iterator<Item = Board> + '_ {
    board
        .all_moves(to_move)
        .map(move |(piece, mv)| simulate(board, piece, &mv))
}

fn improves(score: f32, best: f32, maximizing: bool) -> bool {
    if maximizing { score > best } else { score < best }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, seq::IteratorRandom as _};
    use rand_pcg::Pcg64Mcg;

    use crate::{
        evaluator::{FeatureEvaluator, MaterialEvaluator},
        weights::WeightVector,
    };

    use super::*;

    /// Positions reached by random play from the start, with the side to move.
    fn random_positions(count: usize, plies: usize, seed: u64) -> Vec<(Board, Color)> {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let mut positions = vec![(Board::initial(), Color::Red)];
        while positions.len() < count {
            let mut board = Board::initial();
            let mut turn = Color::Red;
            for _ in 0..plies {
                let Some((piece, mv)) = board.all_moves(turn).choose(&mut rng) else {
                    break;
                };
                board = simulate(&board, piece, &mv);
                turn = turn.opponent();
            }
            positions.push((board, turn));
        }
        positions
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let weighted =
            FeatureEvaluator::new(WeightVector::new(vec![1.0, 1.7, 0.05, 0.3, 0.1, 0.2]));
        let evaluators: [&dyn Evaluator; 2] = [&MaterialEvaluator, &weighted];
        for evaluator in evaluators {
            for (board, turn) in random_positions(6, 14, 7) {
                let search = Search::new(evaluator, turn);
                for depth in 1..=4 {
                    let plain = search.minimax(&board, depth, true);
                    let pruned =
                        search.alpha_beta(&board, depth, f32::NEG_INFINITY, f32::INFINITY, true);
                    assert_eq!(plain.score, pruned.score, "depth {depth}\n{board}");
                }
            }
        }
    }

    #[test]
    fn test_alpha_beta_visits_fewer_nodes() {
        let board = Board::initial();
        let plain = Search::new(&MaterialEvaluator, Color::Red);
        let _ = plain.minimax(&board, 4, true);
        let pruned = Search::new(&MaterialEvaluator, Color::Red);
        let _ = pruned.alpha_beta(&board, 4, f32::NEG_INFINITY, f32::INFINITY, true);
        assert!(pruned.nodes() <= plain.nodes());
        assert!(pruned.nodes() > 0);
    }

    #[test]
    fn test_depth_one_picks_best_single_ply() {
        let board = Board::initial();
        let evaluator =
            FeatureEvaluator::new(WeightVector::new(vec![1.0, 1.5, 0.1, 0.5, 0.2, 0.3]));
        let search = Search::new(&evaluator, Color::Red);
        let result = search.minimax(&board, 1, true);

        let best = board
            .all_moves(Color::Red)
            .map(|(piece, mv)| evaluator.evaluate(&simulate(&board, piece, &mv), Color::Red))
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(result.score, best);
        assert_eq!(evaluator.evaluate(&result.board, Color::Red), best);
    }

    #[test]
    fn test_forced_capture_is_selected() {
        // White's only piece can only jump.
        let board: Board = "........
                            ........
                            .......w
                            ......r.
                            ........
                            ........
                            .....r..
                            ........"
            .parse()
            .unwrap();
        let search = Search::new(&MaterialEvaluator, Color::White);
        for depth in 1..=4 {
            let result = search.alpha_beta(&board, depth, f32::NEG_INFINITY, f32::INFINITY, true);
            assert_eq!(result.board.piece_count(Color::Red), 1, "depth {depth}");
            let minimax = search.minimax(&board, depth, true);
            assert_eq!(minimax.board.piece_count(Color::Red), 1, "depth {depth}");
        }
    }

    #[test]
    fn test_capture_preferred_over_quiet_move() {
        let board: Board = "........
                            ........
                            ...w....
                            ..r.....
                            ........
                            ........
                            ........
                            ........"
            .parse()
            .unwrap();
        let search = Search::new(&MaterialEvaluator, Color::White);
        let result = search.minimax(&board, 1, true);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.board.piece_count(Color::Red), 0);
    }

    #[test]
    fn test_terminal_position_is_not_expanded() {
        let board: Board = "........
                            ........
                            ........
                            ........
                            ........
                            ..w.....
                            .w......
                            r......."
            .parse()
            .unwrap();
        assert_eq!(board.winner(Color::Red), Some(Color::White));
        let search = Search::new(&MaterialEvaluator, Color::Red);
        let result = search.alpha_beta(&board, 3, f32::NEG_INFINITY, f32::INFINITY, true);
        assert_eq!(result.board, board);
        assert_eq!(result.score, MaterialEvaluator.evaluate(&board, Color::Red));
        assert_eq!(search.nodes(), 1);
    }

    #[test]
    fn test_depth_zero_returns_position() {
        let board = Board::initial();
        let search = Search::new(&MaterialEvaluator, Color::White);
        let result = search.minimax(&board, 0, true);
        assert_eq!(result, SearchResult { score: 0.0, board });
    }

    #[test]
    fn test_first_best_child_wins_ties() {
        let board = Board::initial();
        let search = Search::new(&MaterialEvaluator, Color::Red);
        let result = search.minimax(&board, 1, true);
        let (piece, mv) = board.all_moves(Color::Red).next().unwrap();
        assert_eq!(result.board, simulate(&board, piece, &mv));
    }
}
