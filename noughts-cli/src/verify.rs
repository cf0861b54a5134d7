//! Verify command - play out every human line against the engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: verify_opening() - one tree per first mover, fanned out with rayon
//! - Level 3: explore() - depth-first walk of the human's choices
//! - Level 4: Tally bookkeeping and printing

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;

use noughts_core::{evaluate, Board, Outcome, Solver, ENGINE, HUMAN};

/// Losing lines kept for the report
const MAX_REPORTED_LINES: usize = 10;

#[derive(Args)]
pub struct VerifyArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Finished games reached from one starting position
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub games: u64,
    pub engine_wins: u64,
    pub draws: u64,
    pub losses: u64,
    /// Move sequences the engine lost, first few only
    pub losing_lines: Vec<Vec<usize>>,
}

impl Tally {
    fn record(&mut self, outcome: Outcome, line: &[usize]) {
        self.games += 1;
        match outcome {
            Outcome::Win(side) if side == ENGINE => self.engine_wins += 1,
            Outcome::Win(_) => {
                self.losses += 1;
                if self.losing_lines.len() < MAX_REPORTED_LINES {
                    self.losing_lines.push(line.to_vec());
                }
            }
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    fn merge(mut self, other: Tally) -> Tally {
        self.games += other.games;
        self.engine_wins += other.engine_wins;
        self.draws += other.draws;
        self.losses += other.losses;
        let room = MAX_REPORTED_LINES.saturating_sub(self.losing_lines.len());
        self.losing_lines
            .extend(other.losing_lines.into_iter().take(room));
        self
    }
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    human_first: Tally,
    engine_first: Tally,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: VerifyArgs) -> Result<()> {
    tracing::info!("Verifying engine against every human line");

    let report = VerifyReport {
        human_first: verify_opening(false)?,
        engine_first: verify_opening(true)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_tally("Human moves first", &report.human_first);
        print_tally("Engine moves first", &report.engine_first);
    }

    let losses = report.human_first.losses + report.engine_first.losses;
    if losses > 0 {
        anyhow::bail!("engine lost {} games", losses);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Every game from the empty board with the given first mover.
///
/// Each of the human's first moves is explored on its own rayon task with
/// its own solver; nothing is shared between tasks.
pub fn verify_opening(engine_first: bool) -> Result<Tally> {
    let mut start = Board::empty();
    let mut prefix = Vec::new();

    if engine_first {
        let index = Solver::new()
            .solve(&start, ENGINE)
            .best_move
            .context("engine has no opening move")?;
        start = start.play(index, ENGINE)?;
        prefix.push(index);
    }

    let first_moves: Vec<usize> = start.empty_cells().collect();

    let tallies = first_moves
        .par_iter()
        .map(|&index| -> Result<Tally> {
            let mut solver = Solver::new();
            let mut tally = Tally::default();
            let mut line = prefix.clone();
            line.push(index);
            explore(&mut solver, start.play(index, HUMAN)?, &mut line, &mut tally)?;
            tracing::debug!(
                "first move {}: {} games, {} cached positions",
                index,
                tally.games,
                solver.len()
            );
            Ok(tally)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(tallies.into_iter().fold(Tally::default(), Tally::merge))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// `board` has just received a human move; answer it and try every reply
fn explore(
    solver: &mut Solver,
    board: Board,
    line: &mut Vec<usize>,
    tally: &mut Tally,
) -> Result<()> {
    let outcome = evaluate(&board);
    if outcome.is_terminal() {
        tally.record(outcome, line);
        return Ok(());
    }

    let index = solver
        .solve(&board, ENGINE)
        .best_move
        .context("engine has no move on an unfinished board")?;
    let board = board.play(index, ENGINE)?;
    line.push(index);

    let outcome = evaluate(&board);
    if outcome.is_terminal() {
        tally.record(outcome, line);
    } else {
        let replies: Vec<usize> = board.empty_cells().collect();
        for reply in replies {
            line.push(reply);
            explore(solver, board.play(reply, HUMAN)?, line, tally)?;
            line.pop();
        }
    }

    line.pop();
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_tally(label: &str, tally: &Tally) {
    println!("\n=== {} ===", label);
    println!("Games:        {}", tally.games);
    println!("Engine wins:  {}", tally.engine_wins);
    println!("Draws:        {}", tally.draws);
    println!("Losses:       {}", tally.losses);
    for line in &tally.losing_lines {
        println!("  lost: {:?}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_first_tree() {
        let tally = verify_opening(false).unwrap();
        assert_eq!(tally.losses, 0);
        assert_eq!(tally.games, 681);
        assert_eq!(tally.engine_wins, 498);
        assert_eq!(tally.draws, 183);
    }

    #[test]
    fn test_engine_first_tree() {
        let tally = verify_opening(true).unwrap();
        assert_eq!(tally.losses, 0);
        assert_eq!(tally.games, 101);
        assert_eq!(tally.engine_wins, 99);
        assert_eq!(tally.draws, 2);
    }

    #[test]
    fn test_tally_merge_caps_lines() {
        let mut a = Tally::default();
        let mut b = Tally::default();
        for i in 0..MAX_REPORTED_LINES {
            a.record(Outcome::Win(HUMAN), &[i]);
            b.record(Outcome::Win(HUMAN), &[i]);
        }
        b.record(Outcome::Draw, &[]);

        let merged = a.merge(b);
        assert_eq!(merged.games, 2 * MAX_REPORTED_LINES as u64 + 1);
        assert_eq!(merged.losses, 2 * MAX_REPORTED_LINES as u64);
        assert_eq!(merged.draws, 1);
        assert_eq!(merged.losing_lines.len(), MAX_REPORTED_LINES);
    }
}
