//! Solve command - search a single position
//!
//! - Level 1: run() - orchestration
//! - Level 2: analyse(), print_text_report()

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use noughts_core::{
    coords, evaluate, search_with_stats, Board, SearchResult, SearchStats, Side, Winner, ENGINE,
};

#[derive(Args)]
pub struct SolveArgs {
    /// Board notation, row-major: X, O and `.` for empty (e.g. "XX./.O./...")
    pub board: String,

    /// Side to move
    #[arg(long, default_value = "o", value_parser = parse_side)]
    pub mover: Side,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Analysis of one position
#[derive(Debug, Serialize)]
struct SolveReport {
    board: Board,
    mover: Side,
    /// Set when the position is already decided
    winner: Option<Winner>,
    result: Option<SearchResult>,
    /// Board after the chosen move
    next: Option<Board>,
    #[serde(skip)]
    stats: SearchStats,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: SolveArgs) -> Result<()> {
    let board: Board = args
        .board
        .parse()
        .with_context(|| format!("Invalid board: {}", args.board))?;

    let report = analyse(&board, args.mover)?;

    tracing::debug!(
        nodes = report.stats.nodes,
        leaves = report.stats.leaves,
        "solved {}",
        board.to_notation()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&report);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn analyse(board: &Board, mover: Side) -> Result<SolveReport> {
    if let Some(winner) = evaluate(board).winner() {
        return Ok(SolveReport {
            board: *board,
            mover,
            winner: Some(winner),
            result: None,
            next: None,
            stats: SearchStats::default(),
        });
    }

    let (result, stats) = search_with_stats(board, mover);
    let next = result
        .best_move
        .map(|index| board.play(index, mover))
        .transpose()?;

    Ok(SolveReport {
        board: *board,
        mover,
        winner: None,
        result: Some(result),
        next,
        stats,
    })
}

fn print_text_report(report: &SolveReport) {
    println!("{}\n", report.board);

    if let Some(winner) = report.winner {
        println!("Game over: {:?}", winner);
        return;
    }

    if let Some(result) = report.result {
        let verdict = match result.score {
            s if s > 0 => format!("{} wins", ENGINE),
            s if s < 0 => format!("{} wins", ENGINE.opponent()),
            _ => "draw".to_string(),
        };
        match result.best_move {
            Some(index) => {
                let (row, col) = coords(index);
                println!(
                    "{} to move: play {} (row {}, col {}); perfect play ends in a {}",
                    report.mover, index, row, col, verdict
                );
            }
            None => println!("{} has no move", report.mover),
        }
        println!("Searched {} positions", report.stats.nodes);
    }

    if let Some(next) = report.next {
        println!("\n{}", next);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_side(s: &str) -> Result<Side, String> {
    match s {
        "x" | "X" => Ok(Side::X),
        "o" | "O" => Ok(Side::O),
        other => Err(format!("expected x or o, got {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_side() {
        assert_eq!(parse_side("x"), Ok(Side::X));
        assert_eq!(parse_side("O"), Ok(Side::O));
        assert!(parse_side("").is_err());
    }

    #[test]
    fn test_analyse_blocking_move() {
        let board: Board = "XX./.O./...".parse().unwrap();
        let report = analyse(&board, Side::O).unwrap();
        assert_eq!(report.result.unwrap().best_move, Some(2));
        assert_eq!(report.next.unwrap().to_notation(), "XXO.O....");
        assert!(report.stats.nodes > 0);
    }

    #[test]
    fn test_analyse_finished_board() {
        let board: Board = "OOO/XX./X..".parse().unwrap();
        let report = analyse(&board, Side::X).unwrap();
        assert_eq!(report.winner, Some(Winner::O));
        assert!(report.result.is_none());
        assert!(report.next.is_none());
    }
}
