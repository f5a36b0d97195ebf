use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    BOARD_SIZE, CELL_COUNT, STARTING_ROWS,
    moves::Move,
    piece::{Color, Piece},
    square::Square,
};

/// Value of a king relative to a man in the static material balance.
pub const KING_BONUS: f32 = 0.5;

/// Complete placement of pieces on the board.
///
/// Cells are stored as one flat array of optional pieces, so cloning a board is a single
/// contiguous copy. Per-color counters are kept in sync by every mutation.
///
/// # Invariants
///
/// - Every occupied cell holds exactly one piece whose stored square is that cell
/// - Pieces only stand on playable (dark) squares
/// - Men never stand on their own king row (they are promoted on arrival)
///
/// Boards serialize as the list of their pieces; deserialization re-checks every
/// invariant through [`Board::try_place`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Piece>", try_from = "Vec<Piece>")]
pub struct Board {
    cells: [Option<Piece>; CELL_COUNT],
    men: [u8; 2],
    kings: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// A board with no pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            men: [0; 2],
            kings: [0; 2],
        }
    }

    /// The standard starting position: twelve men per side on the dark squares of
    /// each side's first three rows.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for square in Square::all().filter(|sq| sq.is_playable()) {
            if square.row() < STARTING_ROWS {
                board.place(Piece::man(Color::White, square));
            } else if square.row() >= BOARD_SIZE - STARTING_ROWS {
                board.place(Piece::man(Color::Red, square));
            }
        }
        board
    }

    /// Puts a piece on its square.
    ///
    /// # Panics
    ///
    /// Panics if [`Board::try_place`] rejects the piece.
    pub fn place(&mut self, piece: Piece) {
        if let Err(e) = self.try_place(piece) {
            panic!("{e}");
        }
    }

    /// Puts a piece on its square, leaving the board unchanged if the placement would
    /// break an invariant.
    pub fn try_place(&mut self, piece: Piece) -> Result<(), PlacementError> {
        let square = piece.square();
        if !square.is_playable() {
            return Err(PlacementError::LightSquare(square));
        }
        if self.cells[square.index()].is_some() {
            return Err(PlacementError::Occupied(square));
        }
        if !piece.is_king() && square.row() == piece.color().king_row() {
            return Err(PlacementError::UnpromotedMan { square });
        }
        self.cells[square.index()] = Some(piece);
        let color = piece.color().index();
        self.counter_mut(piece)[color] += 1;
        Ok(())
    }

    fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.cells[square.index()].take()?;
        let color = piece.color().index();
        self.counter_mut(piece)[color] -= 1;
        Some(piece)
    }

    fn counter_mut(&mut self, piece: Piece) -> &mut [u8; 2] {
        if piece.is_king() {
            &mut self.kings
        } else {
            &mut self.men
        }
    }

    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    /// Pieces of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.cells
            .iter()
            .flatten()
            .copied()
            .filter(move |p| p.color() == color)
    }

    #[must_use]
    pub fn piece_count(&self, color: Color) -> usize {
        self.man_count(color) + self.king_count(color)
    }

    #[must_use]
    pub fn man_count(&self, color: Color) -> usize {
        usize::from(self.men[color.index()])
    }

    #[must_use]
    pub fn king_count(&self, color: Color) -> usize {
        usize::from(self.kings[color.index()])
    }

    /// Moves `piece` to `to`, removes every captured piece, and promotes on the king row.
    ///
    /// This is the only mutator used for play. Legality is the caller's responsibility:
    /// `to` and `captured` should come from [`Board::valid_moves`] for this piece.
    ///
    /// # Panics
    ///
    /// Panics if `piece` is not on the board, the destination is occupied by another
    /// piece, or a captured square does not hold an opponent piece.
    pub fn apply(&mut self, piece: Piece, to: Square, captured: &[Square]) {
        let from = piece.square();
        assert_eq!(self.piece_at(from), Some(piece), "no such piece at {from}");
        self.take(from);
        assert!(self.piece_at(to).is_none(), "destination {to} is occupied");

        let mut moved = piece;
        moved.move_to(to);
        if moved.promotes_on(to) {
            moved.promote();
        }
        self.place(moved);

        for &square in captured {
            let victim = self.take(square);
            assert!(
                victim.is_some_and(|v| v.color() != piece.color()),
                "captured square {square} holds no opponent piece"
            );
        }
    }

    /// Returns `true` if `color` has at least one legal move.
    #[must_use]
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.pieces(color)
            .any(|piece| !self.valid_moves(piece).is_empty())
    }

    /// Enumerates every `(piece, move)` pair available to `color`.
    ///
    /// Pieces are visited in row-major order and each piece's moves in generation order,
    /// so the sequence is deterministic.
    pub fn all_moves(&self, color: Color) -> impl Iterator<Item = (Piece, Move)> + '_ {
        self.pieces(color).flat_map(move |piece| {
            self.valid_moves(piece)
                .into_iter()
                .map(move |mv| (piece, mv))
        })
    }

    /// Decides the game from the point of view of the side about to move.
    ///
    /// A side loses when it has no pieces left, or when it is `to_move` and has no legal
    /// move. Returns `None` while the game is undecided.
    #[must_use]
    pub fn winner(&self, to_move: Color) -> Option<Color> {
        if self.piece_count(Color::Red) == 0 {
            return Some(Color::White);
        }
        if self.piece_count(Color::White) == 0 {
            return Some(Color::Red);
        }
        (!self.has_legal_move(to_move)).then_some(to_move.opponent())
    }

    /// Static material balance from White's point of view.
    ///
    /// Each piece counts 1 and each king an extra [`KING_BONUS`].
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(&self) -> f32 {
        let pieces =
            self.piece_count(Color::White) as f32 - self.piece_count(Color::Red) as f32;
        let kings = self.king_count(Color::White) as f32 - self.king_count(Color::Red) as f32;
        pieces + kings * KING_BONUS
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let ch = self
                    .piece_at(Square::new(row, col))
                    .map_or('.', Piece::as_char);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl From<Board> for Vec<Piece> {
    fn from(board: Board) -> Self {
        board.cells.into_iter().flatten().collect()
    }
}

impl TryFrom<Vec<Piece>> for Board {
    type Error = PlacementError;

    fn try_from(pieces: Vec<Piece>) -> Result<Self, Self::Error> {
        let mut board = Self::empty();
        for piece in pieces {
            board.try_place(piece)?;
        }
        Ok(board)
    }
}

/// A piece that cannot be put on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("{_0} is not a playable square")]
    LightSquare(#[error(not(source))] Square),
    #[display("{_0} is occupied")]
    Occupied(#[error(not(source))] Square),
    #[display("a man cannot stand on its king row at {square}")]
    UnpromotedMan { square: Square },
}

/// Error returned when parsing a text board fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected {BOARD_SIZE} rows, got {_0}")]
    RowCount(#[error(not(source))] usize),
    #[display("row {row}: expected {BOARD_SIZE} cells, got {len}")]
    RowLength { row: usize, len: usize },
    #[display("invalid cell {ch:?} at ({row}, {col})")]
    InvalidCell { row: usize, col: usize, ch: char },
    #[display("{_0}")]
    Placement(#[error(not(source))] PlacementError),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses the format produced by `Display`: eight lines of eight cells, `r`/`w` for
    /// men, `R`/`W` for kings, `.` for empty. Surrounding whitespace on each line is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != BOARD_SIZE {
                return Err(ParseBoardError::RowLength { row, len });
            }
            for (col, ch) in line.chars().enumerate() {
                let square = Square::new(row, col);
                let piece = match ch {
                    '.' => continue,
                    'r' => Piece::man(Color::Red, square),
                    'R' => Piece::king(Color::Red, square),
                    'w' => Piece::man(Color::White, square),
                    'W' => Piece::king(Color::White, square),
                    _ => return Err(ParseBoardError::InvalidCell { row, col, ch }),
                };
                board
                    .try_place(piece)
                    .map_err(ParseBoardError::Placement)?;
            }
        }
        Ok(board)
    }
}
