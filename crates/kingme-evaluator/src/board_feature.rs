//! Board features consumed by the weighted evaluator.
//!
//! Every feature is measured for one side and its opponent and reported as
//! `own - opponent`, so a feature is antisymmetric: swapping the perspective negates it.
//!
//! | id            | measures                                               |
//! |---------------|--------------------------------------------------------|
//! | `men`         | men on the board                                       |
//! | `kings`       | kings on the board                                     |
//! | `mobility`    | legal moves available                                  |
//! | `advancement` | rows advanced by men toward promotion (0..1 per man)   |
//! | `center`      | pieces inside the central 4×4 box                      |
//! | `back_row`    | men still guarding their own back rank                 |
//!
//! The order of [`BoardFeature::ALL`] defines the layout of a weight vector.

use kingme_engine::{BOARD_SIZE, Board, Color, Piece};

/// A measurable property of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BoardFeature {
    #[display("men")]
    Men,
    #[display("kings")]
    Kings,
    #[display("mobility")]
    Mobility,
    #[display("advancement")]
    Advancement,
    #[display("center")]
    Center,
    #[display("back_row")]
    BackRow,
}

const CENTER_MIN: usize = 2;
const CENTER_MAX: usize = 5;

impl BoardFeature {
    pub const ALL: [Self; 6] = [
        Self::Men,
        Self::Kings,
        Self::Mobility,
        Self::Advancement,
        Self::Center,
        Self::BackRow,
    ];

    /// Stable identifier used in model files.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Kings => "kings",
            Self::Mobility => "mobility",
            Self::Advancement => "advancement",
            Self::Center => "center",
            Self::BackRow => "back_row",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Computes `own - opponent` for `perspective`.
    #[must_use]
    pub fn compute(self, board: &Board, perspective: Color) -> f32 {
        self.measure(board, perspective) - self.measure(board, perspective.opponent())
    }

    #[expect(clippy::cast_precision_loss)]
    fn measure(self, board: &Board, color: Color) -> f32 {
        match self {
            Self::Men => board.man_count(color) as f32,
            Self::Kings => board.king_count(color) as f32,
            Self::Mobility => board.all_moves(color).count() as f32,
            Self::Advancement => board
                .pieces(color)
                .filter(|p| !p.is_king())
                .map(|p| advancement(p, color))
                .sum(),
            Self::Center => board
                .pieces(color)
                .filter(|p| (CENTER_MIN..=CENTER_MAX).contains(&p.row()))
                .filter(|p| (CENTER_MIN..=CENTER_MAX).contains(&p.col()))
                .count() as f32,
            Self::BackRow => board
                .pieces(color)
                .filter(|p| !p.is_king() && p.row() == color.home_row())
                .count() as f32,
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn advancement(piece: Piece, color: Color) -> f32 {
    let rows = piece.row().abs_diff(color.home_row());
    rows as f32 / (BOARD_SIZE - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board_is_balanced() {
        let board = Board::initial();
        for feature in BoardFeature::ALL {
            assert_eq!(feature.compute(&board, Color::Red), 0.0, "{feature}");
        }
    }

    #[test]
    fn test_features_are_antisymmetric() {
        let board: Board = "........
                            ..W.w...
                            ...r....
                            ........
                            ...r....
                            ........
                            .r......
                            r.r....."
            .parse()
            .unwrap();
        for feature in BoardFeature::ALL {
            assert_eq!(
                feature.compute(&board, Color::Red),
                -feature.compute(&board, Color::White),
                "{feature}"
            );
        }
        assert_eq!(BoardFeature::Men.compute(&board, Color::Red), 4.0);
        assert_eq!(BoardFeature::Kings.compute(&board, Color::White), 1.0);
        assert_eq!(BoardFeature::BackRow.compute(&board, Color::Red), 2.0);
        assert_eq!(BoardFeature::Center.compute(&board, Color::Red), 2.0);
    }

    #[test]
    fn test_advancement_counts_rows_from_home() {
        let board: Board = "........
                            r.......
                            ........
                            ........
                            ........
                            ........
                            ........
                            ....r..."
            .parse()
            .unwrap();
        let value = BoardFeature::Advancement.compute(&board, Color::Red);
        assert!((value - 6.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_id_round_trip() {
        for feature in BoardFeature::ALL {
            assert_eq!(BoardFeature::from_id(feature.id()), Some(feature));
            assert_eq!(feature.to_string(), feature.id());
        }
        assert_eq!(BoardFeature::from_id("unknown"), None);
    }
}
