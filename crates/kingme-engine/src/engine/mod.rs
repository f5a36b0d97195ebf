//! Live game state driven by an external controller.
//!
//! [`Game`] owns the board that persists across turns and the side to move. It is the only
//! place where a board is mutated for real play; search works on simulated copies and hands
//! back a resulting board that the controller installs with [`Game::apply_board`].

pub use self::game::*;

mod game;
