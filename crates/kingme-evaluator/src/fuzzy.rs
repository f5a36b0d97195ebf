//! Best-effort fuzzy-logic piece picker.
//!
//! This alternate difficulty flavor scores each of a side's pieces with a small Mamdani
//! fuzzy controller and picks the strongest one. It does not search and sees little of
//! the board: the position input is a fixed constant and only the piece's rank and the
//! overall material balance vary.
//!
//! # Controller
//!
//! All variables use the integer universe `0..=10` with triangular memberships:
//!
//! ```text
//! piece type        soldier [0 3 6]   queen  [4 6 8]   king [7 9 10]
//! piece position    front   [0 3 6]   middle [4 6 8]   back [7 9 10]
//! board evaluation  weak    [0 3 6]   strong [4 6 10]
//! move strength     weak    [0 3 6]   strong [4 6 10]
//!
//! king    AND strong board → weak move
//! soldier AND front        → strong move
//! queen   AND weak board   → strong move
//! ```
//!
//! AND is `min`, rule outputs are clipped and aggregated with `max`, and the crisp
//! strength is the centroid of the aggregate over the universe. Inputs outside the
//! universe are clamped to its edges.
//!
//! When no rule fires the centroid is undefined and [`move_strength`] fails with
//! [`FuzzyError::NoRuleFired`]; [`pick_move`] treats that as strength zero.

use kingme_engine::{Board, Color, Piece, Square};

use crate::evaluator::{Evaluator as _, MaterialEvaluator};

const UNIVERSE_MAX: u8 = 10;

/// Crisp input used for a man.
const SOLDIER_INPUT: f32 = 1.0;
/// Crisp input used for a king.
const KING_INPUT: f32 = 7.0;
/// Position input; the controller is not told where the piece stands.
const POSITION_INPUT: f32 = 5.0;

/// The fuzzy controller produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FuzzyError {
    #[display("no fuzzy rule fired; crisp output is undefined")]
    NoRuleFired,
}

#[derive(Debug, Clone, Copy)]
struct Triangle {
    left: f32,
    peak: f32,
    right: f32,
}

impl Triangle {
    const fn new(left: f32, peak: f32, right: f32) -> Self {
        Self { left, peak, right }
    }

    #[expect(clippy::float_cmp)]
    fn membership(self, x: f32) -> f32 {
        if x == self.peak {
            1.0
        } else if x > self.left && x < self.peak {
            (x - self.left) / (self.peak - self.left)
        } else if x > self.peak && x < self.right {
            (self.right - x) / (self.right - self.peak)
        } else {
            0.0
        }
    }
}

const SOLDIER: Triangle = Triangle::new(0.0, 3.0, 6.0);
const QUEEN: Triangle = Triangle::new(4.0, 6.0, 8.0);
const KING: Triangle = Triangle::new(7.0, 9.0, 10.0);
const FRONT: Triangle = Triangle::new(0.0, 3.0, 6.0);
const WEAK_BOARD: Triangle = Triangle::new(0.0, 3.0, 6.0);
const STRONG_BOARD: Triangle = Triangle::new(4.0, 6.0, 10.0);
const WEAK_MOVE: Triangle = Triangle::new(0.0, 3.0, 6.0);
const STRONG_MOVE: Triangle = Triangle::new(4.0, 6.0, 10.0);

/// Crisp inputs of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyInputs {
    pub piece_type: f32,
    pub piece_position: f32,
    pub board_evaluation: f32,
}

impl FuzzyInputs {
    /// Inputs for `piece` on `board`, from the piece owner's point of view.
    #[must_use]
    pub fn for_piece(board: &Board, piece: Piece) -> Self {
        Self {
            piece_type: if piece.is_king() {
                KING_INPUT
            } else {
                SOLDIER_INPUT
            },
            piece_position: POSITION_INPUT,
            board_evaluation: MaterialEvaluator.evaluate(board, piece.color()),
        }
    }
}

/// Runs the controller and returns the defuzzified move strength in `0..=10`.
pub fn move_strength(inputs: FuzzyInputs) -> Result<f32, FuzzyError> {
    let clamp = |x: f32| x.clamp(0.0, f32::from(UNIVERSE_MAX));
    let piece_type = clamp(inputs.piece_type);
    let position = clamp(inputs.piece_position);
    let evaluation = clamp(inputs.board_evaluation);

    let weak_rule = KING
        .membership(piece_type)
        .min(STRONG_BOARD.membership(evaluation));
    let strong_rule = f32::max(
        SOLDIER.membership(piece_type).min(FRONT.membership(position)),
        QUEEN
            .membership(piece_type)
            .min(WEAK_BOARD.membership(evaluation)),
    );

    let (mut area, mut moment) = (0.0, 0.0);
    for x in (0..=UNIVERSE_MAX).map(f32::from) {
        let mu = f32::max(
            weak_rule.min(WEAK_MOVE.membership(x)),
            strong_rule.min(STRONG_MOVE.membership(x)),
        );
        area += mu;
        moment += mu * x;
    }
    if area <= 0.0 {
        return Err(FuzzyError::NoRuleFired);
    }
    Ok(moment / area)
}

/// Picks the square of `color`'s strongest piece, or `None` if it has no pieces.
///
/// Controller failures count as strength zero. Ties keep the first piece in row-major
/// order.
#[must_use]
pub fn pick_move(board: &Board, color: Color) -> Option<Square> {
    let mut best: Option<(Square, f32)> = None;
    for piece in board.pieces(color) {
        let strength = move_strength(FuzzyInputs::for_piece(board, piece)).unwrap_or_else(|e| {
            tracing::debug!(square = %piece.square(), error = %e, "fuzzy strength fallback");
            0.0
        });
        if best.is_none_or(|(_, s)| strength > s) {
            best = Some((piece.square(), strength));
        }
    }
    best.map(|(square, _)| square)
}
