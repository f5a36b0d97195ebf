//! Playing selectors against each other.
//!
//! Used by the `auto-play` command and by the genetic optimizer's fitness function.

use kingme_engine::{Board, Color};
use serde::{Deserialize, Serialize};

use crate::strategy::MoveSelector;

/// Result of a finished or truncated match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Winning side, or `None` if the ply limit was reached first.
    pub winner: Option<Color>,
    /// Final position.
    pub board: Board,
    /// Number of plies played.
    pub plies: usize,
}

impl MatchOutcome {
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Plays from `board` with `first` to move until one side wins or `ply_limit` plies have
/// been played.
#[must_use]
pub fn play_match(
    white: &dyn MoveSelector,
    red: &dyn MoveSelector,
    board: Board,
    first: Color,
    ply_limit: usize,
) -> MatchOutcome {
    play_match_with(white, red, board, first, ply_limit, |_, _, _| {})
}

/// Like [`play_match`], calling `on_ply(ply, mover, board_after)` after every move.
pub fn play_match_with<F>(
    white: &dyn MoveSelector,
    red: &dyn MoveSelector,
    mut board: Board,
    first: Color,
    ply_limit: usize,
    mut on_ply: F,
) -> MatchOutcome
where
    F: FnMut(usize, Color, &Board),
{
    let mut turn = first;
    for ply in 0..ply_limit {
        if let Some(winner) = board.winner(turn) {
            return MatchOutcome {
                winner: Some(winner),
                board,
                plies: ply,
            };
        }
        let selector = match turn {
            Color::Red => red,
            Color::White => white,
        };
        let Some(next) = selector.select(&board, turn) else {
            return MatchOutcome {
                winner: Some(turn.opponent()),
                board,
                plies: ply,
            };
        };
        board = next;
        on_ply(ply + 1, turn, &board);
        turn = turn.opponent();
    }

    let winner = board.winner(turn);
    MatchOutcome {
        winner,
        board,
        plies: ply_limit,
    }
}
