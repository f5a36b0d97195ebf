use crate::core::{Board, Move, Piece};

/// Produces the board reached by playing `mv` with `piece`, leaving `board` untouched.
///
/// The input is copied (one flat array copy), the piece is looked up in the copy by its
/// square, and the move is applied there. Search expands every tree node through this
/// function, so it performs no heap allocation.
///
/// # Panics
///
/// Panics if `piece` is not on `board` or `mv` does not start at the piece's square.
#[must_use]
pub fn simulate(board: &Board, piece: Piece, mv: &Move) -> Board {
    assert_eq!(piece.square(), mv.from());
    let mut next = board.clone();
    let piece = next
        .piece_at(mv.from())
        .filter(|p| *p == piece)
        .unwrap_or_else(|| panic!("no matching piece at {}", mv.from()));
    next.apply(piece, mv.to(), mv.captured());
    next
}

#[cfg(test)]
mod tests {
    use crate::{Color, Square};

    use super::*;

    #[test]
    fn test_simulate_leaves_input_unchanged() {
        let board: Board = "........
                            ........
                            .w......
                            ..r.....
                            ........
                            ........
                            ........
                            ........"
            .parse()
            .unwrap();
        let before = board.clone();
        let piece = board.piece_at(Square::new(2, 1)).unwrap();
        for mv in board.valid_moves(piece).iter() {
            let next = simulate(&board, piece, mv);
            assert_eq!(board, before);
            assert_ne!(next, board);
            assert_eq!(next.piece_at(mv.to()).map(Piece::color), Some(Color::White));
            assert!(next.piece_at(mv.from()).is_none());
        }
    }

    #[test]
    fn test_simulate_applies_capture() {
        let board: Board = "........
                            ........
                            .w......
                            ..r.....
                            ........
                            ........
                            ........
                            ........"
            .parse()
            .unwrap();
        let piece = board.piece_at(Square::new(2, 1)).unwrap();
        let moves = board.valid_moves(piece);
        let capture = moves.get(Square::new(4, 3)).unwrap();
        let next = simulate(&board, piece, capture);
        assert_eq!(next.piece_count(Color::Red), 0);
        assert_eq!(board.piece_count(Color::Red), 1);
    }

    #[test]
    fn test_successors_are_independent() {
        let board = Board::initial();
        let children: Vec<Board> = board
            .all_moves(Color::Red)
            .map(|(piece, mv)| simulate(&board, piece, &mv))
            .collect();
        assert_eq!(children.len(), 7);
        for (i, a) in children.iter().enumerate() {
            for b in &children[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(board, Board::initial());
    }
}
