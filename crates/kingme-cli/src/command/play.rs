use std::{
    io::{self, BufRead as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use kingme_engine::{Board, Color, Game, Square};
use kingme_evaluator::{
    match_play::play_match_with,
    strategy::{Difficulty, MoveSelector},
};

use crate::{model::ai_model::AiModel, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// AI difficulty (easy, medium, hard, expert, fuzzy)
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,
    /// Override the search depth of the difficulty tier
    #[arg(long)]
    depth: Option<u32>,
    /// Trained model used by the expert tier (JSON format)
    #[arg(long)]
    model: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Difficulty of the Red player
    #[arg(long, default_value = "medium")]
    red: Difficulty,
    /// Difficulty of the White player
    #[arg(long, default_value = "hard")]
    white: Difficulty,
    /// Trained model used by expert players (JSON format)
    #[arg(long)]
    model: Option<PathBuf>,
    /// Declare a draw after this many plies
    #[arg(long, default_value_t = 200)]
    ply_limit: usize,
    /// Only print the final position
    #[arg(long, default_value_t = false)]
    quiet: bool,
    /// Save the winner, ply count and final position to this file (JSON format)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg {
        difficulty,
        depth,
        model,
    } = arg;
    let ai = build_selector(*difficulty, *depth, model.as_deref())?;

    println!("You play red and move first. Enter moves as `row col row col`, `quit` to stop.");

    let mut lines = io::stdin().lock().lines();
    let mut game = Game::new();
    loop {
        println!();
        print!("{}", game.board());
        if let Some(winner) = game.winner() {
            println!("{winner} wins");
            break;
        }

        match game.turn() {
            Color::Red => {
                print!("red> ");
                io::stdout().flush().context("Failed to flush stdout")?;
                let Some(line) = lines.next() else {
                    break;
                };
                let line = line.context("Failed to read from stdin")?;
                let line = line.trim();
                if matches!(line, "q" | "quit") {
                    break;
                }
                let result = parse_move(line)
                    .map_err(anyhow::Error::from)
                    .and_then(|(from, to)| Ok(game.apply_move(from, to)?));
                match result {
                    Ok(mv) => tracing::debug!(?mv, "red moved"),
                    Err(e) => println!("{e}"),
                }
            }
            Color::White => {
                let Some(board) = ai.select(game.board(), Color::White) else {
                    break;
                };
                game.apply_board(board);
                println!("{difficulty} AI moved");
            }
        }
    }

    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        red,
        white,
        model,
        ply_limit,
        quiet,
        output,
    } = arg;
    let red_ai = build_selector(*red, None, model.as_deref())?;
    let white_ai = build_selector(*white, None, model.as_deref())?;

    let outcome = play_match_with(
        white_ai.as_ref(),
        red_ai.as_ref(),
        Board::initial(),
        Color::Red,
        *ply_limit,
        |ply, mover, board| {
            if !quiet {
                println!("ply {ply}: {mover}");
                println!("{board}");
            }
        },
    );

    print!("{}", outcome.board);
    match outcome.winner {
        Some(winner) => {
            let difficulty = match winner {
                Color::Red => red,
                Color::White => white,
            };
            println!("{winner} ({difficulty}) wins after {} plies", outcome.plies);
        }
        None => println!("draw after {} plies", outcome.plies),
    }
    if let Some(path) = output {
        util::save_json(&outcome, Some(path.as_path()))?;
        tracing::info!(path = %path.display(), "saved match result");
    }
    Ok(())
}

fn build_selector(
    difficulty: Difficulty,
    depth: Option<u32>,
    model: Option<&Path>,
) -> anyhow::Result<Box<dyn MoveSelector>> {
    let mut config = difficulty.config();
    if let Some(depth) = depth {
        config.depth = depth;
    }
    let weights = model
        .map(|path| -> anyhow::Result<_> {
            let model = AiModel::open(path)?;
            let weights = model
                .to_weight_vector()
                .with_context(|| format!("Invalid AI model file: {}", path.display()))?;
            tracing::info!(
                name = %model.name,
                fitness = model.final_fitness,
                "loaded AI model"
            );
            Ok(weights)
        })
        .transpose()?;
    tracing::info!(%difficulty, algorithm = %config.algorithm, depth = config.depth, "AI player");
    Ok(config.build(weights))
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
enum MoveInputError {
    #[display("expected a move as `row col row col`")]
    Format,
    #[display("({row}, {col}) is off the board")]
    OffBoard { row: isize, col: isize },
}

fn parse_move(line: &str) -> Result<(Square, Square), MoveInputError> {
    let numbers = line
        .split_whitespace()
        .map(str::parse::<isize>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| MoveInputError::Format)?;
    let [from_row, from_col, to_row, to_col] = numbers[..] else {
        return Err(MoveInputError::Format);
    };
    let square = |row, col| Square::checked(row, col).ok_or(MoveInputError::OffBoard { row, col });
    Ok((square(from_row, from_col)?, square(to_row, to_col)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse_move(" 5 0   4 1 "),
            Ok((Square::new(5, 0), Square::new(4, 1)))
        );
        assert_eq!(parse_move("5 0 4"), Err(MoveInputError::Format));
        assert_eq!(parse_move("5 0 4 x"), Err(MoveInputError::Format));
        assert_eq!(
            parse_move("5 0 8 1"),
            Err(MoveInputError::OffBoard { row: 8, col: 1 })
        );
        assert_eq!(
            parse_move("-1 0 4 1"),
            Err(MoveInputError::OffBoard { row: -1, col: 0 })
        );
    }
}
