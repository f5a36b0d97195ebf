use arrayvec::ArrayVec;

use super::{board::Board, piece::Piece, square::Square};

/// Upper bound on pieces captured by one chain (the opponent's full starting count).
pub const MAX_CHAIN_LEN: usize = 12;

/// Upper bound on distinct destinations of one piece (one per playable square).
pub const MAX_DESTINATIONS: usize = 32;

/// Pieces captured by a single move, in jump order.
pub type CaptureChain = ArrayVec<Square, MAX_CHAIN_LEN>;

/// A move of one piece to a destination, with the pieces it captures on the way.
///
/// A simple step captures nothing; a single jump captures one piece; a forced chain
/// captures every piece jumped before the chain is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    captured: CaptureChain,
}

impl Move {
    #[must_use]
    pub fn step(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: CaptureChain::new(),
        }
    }

    #[must_use]
    pub fn capture(from: Square, to: Square, captured: CaptureChain) -> Self {
        Self { from, to, captured }
    }

    #[must_use]
    pub fn from(&self) -> Square {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> Square {
        self.to
    }

    #[must_use]
    pub fn captured(&self) -> &[Square] {
        &self.captured
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Legal moves of one piece, keyed by destination.
///
/// Destinations are unique. Iteration order is generation order: capture chains first,
/// then simple steps, each in the piece's direction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidMoveSet {
    moves: ArrayVec<Move, MAX_DESTINATIONS>,
}

impl ValidMoveSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a move, keeping the longer capture chain when the destination is already known.
    pub fn insert(&mut self, mv: Move) {
        match self.moves.iter_mut().find(|m| m.to == mv.to) {
            Some(existing) => {
                if mv.captured.len() > existing.captured.len() {
                    *existing = mv;
                }
            }
            None => self.moves.push(mv),
        }
    }

    /// Returns the move landing on `to`, if any.
    #[must_use]
    pub fn get(&self, to: Square) -> Option<&Move> {
        self.moves.iter().find(|m| m.to == to)
    }

    #[must_use]
    pub fn contains(&self, to: Square) -> bool {
        self.get(to).is_some()
    }

    pub fn destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves.iter().map(|m| m.to)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Move> {
        self.moves.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl IntoIterator for ValidMoveSet {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_DESTINATIONS>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl Board {
    /// Enumerates the legal destinations of `piece`.
    ///
    /// Men move and capture toward the opponent's side; kings use all four diagonals.
    /// Both use single-hop steps and captures. After a jump the chain continues while the
    /// same piece can jump again, so every capture entry is the end of an exhausted chain.
    /// A man that reaches its king row stops there. A king chain that can only end back
    /// on its origin stops one jump short, on the last square it landed on.
    ///
    /// The caller must pass a piece currently placed on this board.
    #[must_use]
    pub fn valid_moves(&self, piece: Piece) -> ValidMoveSet {
        debug_assert_eq!(self.piece_at(piece.square()), Some(piece));

        let mut moves = ValidMoveSet::new();
        let mut captured = CaptureChain::new();
        self.collect_jumps(piece, piece.square(), piece.square(), &mut captured, &mut moves);

        for &dir in piece.directions() {
            if let Some(to) = piece.square().offset(dir, 1)
                && self.piece_at(to).is_none()
            {
                moves.insert(Move::step(piece.square(), to));
            }
        }
        moves
    }

    /// Extends the chain that reached `at` by jumping from `prev`.
    fn collect_jumps(
        &self,
        piece: Piece,
        prev: Square,
        at: Square,
        captured: &mut CaptureChain,
        moves: &mut ValidMoveSet,
    ) {
        let origin = piece.square();
        let mut extended = false;
        for &dir in piece.directions() {
            let (Some(over), Some(landing)) = (at.offset(dir, 1), at.offset(dir, 2)) else {
                continue;
            };
            let Some(victim) = self.piece_at(over) else {
                continue;
            };
            if victim.color() == piece.color() || captured.contains(&over) {
                continue;
            }
            // Jumped pieces stay on the board until the chain ends; the mover has left its origin.
            if landing != origin && self.piece_at(landing).is_some() {
                continue;
            }

            extended = true;
            captured.push(over);
            if piece.promotes_on(landing) {
                moves.insert(Move::capture(origin, landing, captured.clone()));
            } else {
                self.collect_jumps(piece, at, landing, captured, moves);
            }
            captured.pop();
        }

        if extended || captured.is_empty() {
            return;
        }
        if at == origin {
            // The origin is still occupied by the mover, so the last jump is dropped.
            let prefix = captured[..captured.len() - 1].iter().copied().collect();
            moves.insert(Move::capture(origin, prev, prefix));
        } else {
            moves.insert(Move::capture(origin, at, captured.clone()));
        }
    }
}
