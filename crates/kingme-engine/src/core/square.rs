use serde::{Deserialize, Deserializer, Serialize, de};

use super::{BOARD_SIZE, CELL_COUNT};

/// A board coordinate.
///
/// Row 0 is White's back rank (top of the printed board), row 7 is Red's.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Square {
    row: u8,
    col: u8,
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            row: usize,
            col: usize,
        }

        let Raw { row, col } = Raw::deserialize(deserializer)?;
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(de::Error::custom(format!(
                "square ({row}, {col}) is off the board"
            )));
        }
        Ok(Self::new(row, col))
    }
}

impl Square {
    /// Creates a square from board coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are off the board.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    /// Creates a square from signed coordinates, returning `None` when off the board.
    #[must_use]
    pub fn checked(row: isize, col: isize) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then(|| Self::new(row, col))
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Returns the square `steps` diagonal steps away in direction `(dr, dc)`.
    #[must_use]
    pub fn offset(self, (dr, dc): (isize, isize), steps: isize) -> Option<Self> {
        Self::checked(
            isize::from(self.row) + dr * steps,
            isize::from(self.col) + dc * steps,
        )
    }

    /// Returns `true` for the dark squares pieces can stand on.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        self.col % 2 == (self.row + 1) % 2
    }

    pub(crate) const fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index < CELL_COUNT);
        Self::new(index / BOARD_SIZE, index % BOARD_SIZE)
    }

    /// Iterates over every square in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CELL_COUNT).map(Self::from_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_rejects_off_board() {
        assert_eq!(Square::checked(-1, 0), None);
        assert_eq!(Square::checked(0, 8), None);
        assert_eq!(Square::checked(7, 7), Some(Square::new(7, 7)));
    }

    #[test]
    fn test_offset() {
        let sq = Square::new(2, 1);
        assert_eq!(sq.offset((1, 1), 1), Some(Square::new(3, 2)));
        assert_eq!(sq.offset((1, -1), 2), None);
        assert_eq!(sq.offset((-1, -1), 1), Some(Square::new(1, 0)));
    }

    #[test]
    fn test_playable_squares() {
        assert_eq!(Square::all().filter(|sq| sq.is_playable()).count(), 32);
        assert!(Square::new(0, 1).is_playable());
        assert!(!Square::new(0, 0).is_playable());
        assert!(Square::new(5, 0).is_playable());
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let square: Square = serde_json::from_str(r#"{"row":7,"col":0}"#).unwrap();
        assert_eq!(square, Square::new(7, 0));
        assert_eq!(serde_json::to_string(&square).unwrap(), r#"{"row":7,"col":0}"#);
        let result: Result<Square, _> = serde_json::from_str(r#"{"row":8,"col":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_index_round_trip() {
        for sq in Square::all() {
            assert_eq!(Square::from_index(sq.index()), sq);
        }
    }
}
