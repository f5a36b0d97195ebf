//! Checkers game model: board state, move generation, and move simulation.
//!
//! This crate holds everything the search layer needs to reason about a position:
//!
//! - [`Board`] - 8×8 grid of optional [`Piece`]s with per-color counters
//! - [`Board::valid_moves`] - legal destinations for one piece, including whole capture chains
//! - [`simulate`] - produces an independent successor board without touching the input
//! - [`Game`] - the live game (board + side to move) driven by an external controller
//!
//! Boards are plain values. Cloning copies one flat array, so the search layer can expand
//! every tree node into its own board without sharing mutable state.
//!
//! # Example
//!
//! ```
//! use kingme_engine::{Board, Color};
//!
//! let board = Board::initial();
//! let moves = board.all_moves(Color::Red).count();
//! assert_eq!(moves, 7);
//! ```

pub use self::{core::*, engine::*, simulate::simulate};

pub mod core;
pub mod engine;
mod simulate;

/// A move request rejected at the board boundary.
///
/// The game state is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidMoveRequest {
    #[display("the game is already over")]
    GameOver,
    #[display("no piece at {_0}")]
    NoPiece(#[error(not(source))] Square),
    #[display("piece at {_0} does not belong to the side to move")]
    NotYourPiece(#[error(not(source))] Square),
    #[display("{to} is not a legal destination for the piece at {from}")]
    IllegalDestination { from: Square, to: Square },
    #[display("no piece is selected")]
    NothingSelected,
}
