use crate::{
    InvalidMoveRequest,
    core::{Board, Color, Move, Piece, Square, ValidMoveSet},
};

/// Outcome of a successful [`Game::select`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Selection {
    /// A piece of the side to move is now selected.
    Selected(Square),
    /// The selected piece was moved; the turn has passed.
    Moved(Move),
}

/// The live game: the persistent board plus the side to move.
///
/// Red moves first. All requests are validated here; a rejected request leaves the
/// game unchanged.
///
/// # Example
///
/// ```
/// use kingme_engine::{Color, Game, Square};
///
/// let mut game = Game::new();
/// game.select(Square::new(5, 0)).unwrap();
/// game.select(Square::new(4, 1)).unwrap();
/// assert_eq!(game.turn(), Color::White);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    selected: Option<(Piece, ValidMoveSet)>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(Board::initial(), Color::Red)
    }

    /// Starts a game from an arbitrary position.
    #[must_use]
    pub fn with_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            selected: None,
        }
    }

    /// Restarts from the initial position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The selected piece and its legal destinations, if any.
    #[must_use]
    pub fn selected(&self) -> Option<(Piece, &ValidMoveSet)> {
        self.selected.as_ref().map(|(piece, moves)| (*piece, moves))
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.board.winner(self.turn)
    }

    /// Click-style interaction: select a piece, then select one of its destinations.
    ///
    /// Selecting another piece of the side to move replaces the selection.
    pub fn select(&mut self, square: Square) -> Result<Selection, InvalidMoveRequest> {
        self.ensure_running()?;

        if let Some((piece, moves)) = &self.selected
            && let Some(mv) = moves.get(square)
        {
            let (piece, mv) = (*piece, mv.clone());
            self.play(piece, &mv);
            return Ok(Selection::Moved(mv));
        }

        match self.board.piece_at(square) {
            Some(piece) if piece.color() == self.turn => {
                self.selected = Some((piece, self.board.valid_moves(piece)));
                Ok(Selection::Selected(square))
            }
            Some(_) => Err(InvalidMoveRequest::NotYourPiece(square)),
            None => match &self.selected {
                Some((piece, _)) => Err(InvalidMoveRequest::IllegalDestination {
                    from: piece.square(),
                    to: square,
                }),
                None => Err(InvalidMoveRequest::NoPiece(square)),
            },
        }
    }

    /// Moves the piece on `from` to `to` in one validated step.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<Move, InvalidMoveRequest> {
        self.ensure_running()?;
        let piece = self
            .board
            .piece_at(from)
            .ok_or(InvalidMoveRequest::NoPiece(from))?;
        if piece.color() != self.turn {
            return Err(InvalidMoveRequest::NotYourPiece(from));
        }
        let mv = self
            .board
            .valid_moves(piece)
            .get(to)
            .cloned()
            .ok_or(InvalidMoveRequest::IllegalDestination { from, to })?;
        self.play(piece, &mv);
        Ok(mv)
    }

    /// Installs a board produced by search for the side to move and passes the turn.
    pub fn apply_board(&mut self, board: Board) {
        self.board = board;
        self.end_turn();
    }

    /// Every legal move of the side to move.
    pub fn legal_moves(&self) -> impl Iterator<Item = (Piece, Move)> + '_ {
        self.board.all_moves(self.turn)
    }

    fn ensure_running(&self) -> Result<(), InvalidMoveRequest> {
        match self.winner() {
            Some(_) => Err(InvalidMoveRequest::GameOver),
            None => Ok(()),
        }
    }

    fn play(&mut self, piece: Piece, mv: &Move) {
        self.board.apply(piece, mv.to(), mv.captured());
        self.end_turn();
    }

    fn end_turn(&mut self) {
        self.selected = None;
        self.turn = self.turn.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_then_move() {
        let mut game = Game::new();
        assert_eq!(
            game.select(Square::new(5, 2)),
            Ok(Selection::Selected(Square::new(5, 2)))
        );
        let (piece, moves) = game.selected().unwrap();
        assert_eq!(piece.square(), Square::new(5, 2));
        assert_eq!(moves.len(), 2);

        let result = game.select(Square::new(4, 3)).unwrap();
        assert!(result.is_moved());
        assert_eq!(game.turn(), Color::White);
        assert!(game.selected().is_none());
        assert!(game.board().piece_at(Square::new(4, 3)).is_some());
    }

    #[test]
    fn test_reselect_own_piece() {
        let mut game = Game::new();
        game.select(Square::new(5, 2)).unwrap();
        assert_eq!(
            game.select(Square::new(5, 4)),
            Ok(Selection::Selected(Square::new(5, 4)))
        );
        assert_eq!(game.turn(), Color::Red);
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut game = Game::new();
        let before = game.board().clone();
        assert_eq!(
            game.select(Square::new(4, 1)),
            Err(InvalidMoveRequest::NoPiece(Square::new(4, 1)))
        );
        assert_eq!(
            game.select(Square::new(2, 1)),
            Err(InvalidMoveRequest::NotYourPiece(Square::new(2, 1)))
        );
        game.select(Square::new(5, 2)).unwrap();
        assert_eq!(
            game.select(Square::new(3, 2)),
            Err(InvalidMoveRequest::IllegalDestination {
                from: Square::new(5, 2),
                to: Square::new(3, 2),
            })
        );
        assert_eq!(
            game.apply_move(Square::new(6, 1), Square::new(5, 0)),
            Err(InvalidMoveRequest::IllegalDestination {
                from: Square::new(6, 1),
                to: Square::new(5, 0),
            })
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.turn(), Color::Red);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let board: Board = "........
                            ........
                            ........
                            ........
                            ........
                            ..w.....
                            .w......
                            r......."
            .parse()
            .unwrap();
        let mut game = Game::with_board(board, Color::Red);
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(
            game.select(Square::new(7, 0)),
            Err(InvalidMoveRequest::GameOver)
        );
    }

    #[test]
    fn test_apply_board_passes_turn() {
        let mut game = Game::new();
        let (piece, mv) = game.legal_moves().next().unwrap();
        let next = crate::simulate(game.board(), piece, &mv);
        game.apply_board(next.clone());
        assert_eq!(game.board(), &next);
        assert_eq!(game.turn(), Color::White);

        game.reset();
        assert_eq!(game.board(), &Board::initial());
        assert_eq!(game.turn(), Color::Red);
    }
}
