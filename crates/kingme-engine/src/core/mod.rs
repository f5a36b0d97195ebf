pub use self::{board::*, moves::*, piece::*, square::*};

pub(crate) mod board;
pub(crate) mod moves;
pub(crate) mod piece;
pub(crate) mod square;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 8;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Number of starting rows filled by each side.
pub(crate) const STARTING_ROWS: usize = 3;
