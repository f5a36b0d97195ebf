use serde::{Deserialize, Serialize};

use super::{BOARD_SIZE, square::Square};

/// One of the two sides.
///
/// Red starts on rows 5-7 and advances toward row 0; White starts on rows 0-2 and
/// advances toward row 7.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Color {
    #[display("red")]
    Red,
    #[display("white")]
    White,
}

impl Color {
    pub const ALL: [Self; 2] = [Self::Red, Self::White];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Red => Self::White,
            Self::White => Self::Red,
        }
    }

    /// Row delta a man of this color moves along.
    #[must_use]
    pub const fn direction(self) -> isize {
        match self {
            Self::Red => -1,
            Self::White => 1,
        }
    }

    /// Row on which men of this color are promoted.
    #[must_use]
    pub const fn king_row(self) -> usize {
        match self {
            Self::Red => 0,
            Self::White => BOARD_SIZE - 1,
        }
    }

    /// Row on which men of this color start (their own back rank).
    #[must_use]
    pub const fn home_row(self) -> usize {
        self.opponent().king_row()
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::White => 1,
        }
    }
}

/// A checker on the board.
///
/// Pieces have no identity: two pieces with the same color, position, and rank are
/// interchangeable. The stored position always matches the board cell holding the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    square: Square,
    king: bool,
}

// Indexed by `Color::index`
const MAN_DIRECTIONS: [[(isize, isize); 2]; 2] = [[(-1, -1), (-1, 1)], [(1, -1), (1, 1)]];
const KING_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

impl Piece {
    #[must_use]
    pub const fn man(color: Color, square: Square) -> Self {
        Self {
            color,
            square,
            king: false,
        }
    }

    #[must_use]
    pub const fn king(color: Color, square: Square) -> Self {
        Self {
            color,
            square,
            king: true,
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn square(self) -> Square {
        self.square
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.square.row()
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.square.col()
    }

    #[must_use]
    pub const fn is_king(self) -> bool {
        self.king
    }

    /// Row delta this piece advances along before promotion.
    #[must_use]
    pub const fn direction(self) -> isize {
        self.color.direction()
    }

    /// Diagonal directions this piece may step and capture along.
    #[must_use]
    pub fn directions(self) -> &'static [(isize, isize)] {
        if self.king {
            &KING_DIRECTIONS
        } else {
            &MAN_DIRECTIONS[self.color.index()]
        }
    }

    /// Returns `true` if a man of this piece's color landing on `square` is promoted.
    #[must_use]
    pub const fn promotes_on(self, square: Square) -> bool {
        !self.king && square.row() == self.color.king_row()
    }

    pub(crate) fn move_to(&mut self, square: Square) {
        self.square = square;
    }

    pub(crate) fn promote(&mut self) {
        self.king = true;
    }

    /// Character used by the text rendering of the board.
    #[must_use]
    pub const fn as_char(self) -> char {
        match (self.color, self.king) {
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
            (Color::White, false) => 'w',
            (Color::White, true) => 'W',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        assert_eq!(Color::Red.direction(), -1);
        assert_eq!(Color::White.direction(), 1);
        let red = Piece::man(Color::Red, Square::new(5, 0));
        assert!(red.directions().iter().all(|(dr, _)| *dr == -1));
        let white = Piece::man(Color::White, Square::new(2, 1));
        assert!(white.directions().iter().all(|(dr, _)| *dr == 1));
        let king = Piece::king(Color::White, Square::new(4, 3));
        assert_eq!(king.directions().len(), 4);
    }

    #[test]
    fn test_promotion_rows() {
        let red = Piece::man(Color::Red, Square::new(1, 2));
        assert!(red.promotes_on(Square::new(0, 1)));
        assert!(!red.promotes_on(Square::new(7, 0)));
        let white = Piece::man(Color::White, Square::new(6, 1));
        assert!(white.promotes_on(Square::new(7, 0)));
        assert!(!Piece::king(Color::White, Square::new(6, 1)).promotes_on(Square::new(7, 0)));
    }

    #[test]
    fn test_home_row() {
        assert_eq!(Color::Red.home_row(), 7);
        assert_eq!(Color::White.home_row(), 0);
    }
}
