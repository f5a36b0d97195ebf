//! Position evaluation and adversarial search for checkers.
//!
//! This crate turns the board model of `kingme-engine` into move decisions:
//!
//! 1. **Features** ([`board_feature`]) - signed `own - opponent` measurements of a board
//! 2. **Evaluation** ([`evaluator`]) - weighted sum of features, parameterized by a
//!    [`WeightVector`](weights::WeightVector)
//! 3. **Search** ([`search`]) - minimax and alpha-beta over simulated successor boards
//! 4. **Hybrid** ([`hybrid`]) - alpha-beta closed over genetically tuned weights
//! 5. **Strategies** ([`strategy`]) - pluggable move selectors picked by difficulty tier,
//!    including the best-effort [`fuzzy`] picker
//! 6. **Match play** ([`match_play`]) - plays selectors against each other
//!
//! # Architecture
//!
//! ```text
//! Difficulty tier
//!     ↓ builds
//! MoveSelector (minimax / alpha-beta / hybrid / fuzzy)
//!     ↓ runs
//! Search (expands children with kingme_engine::simulate)
//!     ↓ scores leaves with
//! Evaluator (weighted board features)
//! ```
//!
//! Search returns the chosen resulting board rather than a move descriptor; the caller
//! installs it as the new game state.
//!
//! # Example
//!
//! ```
//! use kingme_engine::{Board, Color};
//! use kingme_evaluator::{evaluator::MaterialEvaluator, search::Search};
//!
//! let board = Board::initial();
//! let search = Search::new(&MaterialEvaluator, Color::Red);
//! let result = search.alpha_beta(&board, 3, f32::NEG_INFINITY, f32::INFINITY, true);
//! assert_ne!(result.board, board);
//! ```

pub mod board_feature;
pub mod evaluator;
pub mod fuzzy;
pub mod hybrid;
pub mod match_play;
pub mod search;
pub mod strategy;
pub mod weights;
