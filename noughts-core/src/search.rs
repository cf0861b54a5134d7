//! Exhaustive minimax search
//!
//! Scores are always from the engine's point of view: the engine (O) is
//! the maximizer and the human (X) the minimizer. Every continuation is
//! explored; there is no pruning and no depth limit.

use crate::board::{Board, Cell, Side, BOARD_CELLS, ENGINE};
use crate::error::{EngineError, Result};
use crate::outcome::{evaluate, Outcome};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

// ============================================================================
// SCORES
// ============================================================================

/// Game-theoretic value of a position
pub type Score = i8;

pub const WIN_SCORE: Score = 1;
pub const DRAW_SCORE: Score = 0;
pub const LOSS_SCORE: Score = -1;

/// Running-best starting points, outside the reachable score range
const BELOW_MIN: Score = -2;
const ABOVE_MAX: Score = 2;

/// Best achievable score and the move that achieves it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: Score,
    /// `None` when the position is already decided
    pub best_move: Option<usize>,
}

impl SearchResult {
    fn leaf(score: Score) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Node counters collected during a search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
}

/// Leaf value of a finished game, `None` while play continues
pub fn terminal_score(outcome: Outcome) -> Option<Score> {
    match outcome {
        Outcome::Win(side) if side == ENGINE => Some(WIN_SCORE),
        Outcome::Win(_) => Some(LOSS_SCORE),
        Outcome::Draw => Some(DRAW_SCORE),
        Outcome::InProgress => None,
    }
}

/// Strict improvement only: ties keep the earlier (lower index) move
pub(crate) fn improves(score: Score, best: Score, mover: Side) -> bool {
    if mover == ENGINE {
        score > best
    } else {
        score < best
    }
}

pub(crate) fn initial_best(mover: Side) -> SearchResult {
    SearchResult::leaf(if mover == ENGINE { BELOW_MIN } else { ABOVE_MAX })
}

// ============================================================================
// SCRATCH BOARD
// ============================================================================

/// A mark placed on the scratch board; the cell is emptied again on drop
pub(crate) struct Placed<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> Placed<'a> {
    pub(crate) fn new(board: &'a mut Board, index: usize, side: Side) -> Self {
        board.place(index, side);
        Self { board, index }
    }
}

impl Deref for Placed<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Placed<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Placed<'_> {
    fn drop(&mut self) {
        self.board.clear(self.index);
    }
}

// ============================================================================
// MINIMAX
// ============================================================================

/// Optimal move for `mover` on `board`
pub fn search(board: &Board, mover: Side) -> SearchResult {
    search_with_stats(board, mover).0
}

/// [`search`], also returning how many nodes were visited
pub fn search_with_stats(board: &Board, mover: Side) -> (SearchResult, SearchStats) {
    let mut scratch = *board;
    let mut stats = SearchStats::default();
    let result = minimax(&mut scratch, mover, &mut stats);
    debug_assert_eq!(&scratch, board);

    tracing::debug!(
        board = %board.to_notation(),
        mover = %mover,
        score = result.score,
        best_move = ?result.best_move,
        nodes = stats.nodes,
        leaves = stats.leaves,
        "search complete"
    );

    (result, stats)
}

/// [`search`] over raw cells; `mover` must be X or O
pub fn search_cells(cells: &[Cell], mover: Cell) -> Result<SearchResult> {
    let board = Board::from_cells(cells)?;
    let mover = mover.side().ok_or(EngineError::InvalidMover)?;
    Ok(search(&board, mover))
}

fn minimax(board: &mut Board, mover: Side, stats: &mut SearchStats) -> SearchResult {
    stats.nodes += 1;

    if let Some(score) = terminal_score(evaluate(board)) {
        stats.leaves += 1;
        return SearchResult::leaf(score);
    }

    let mut best = initial_best(mover);

    for index in 0..BOARD_CELLS {
        if board.get(index) != Some(Cell::Empty) {
            continue;
        }

        let score = {
            let mut placed = Placed::new(board, index, mover);
            minimax(&mut placed, mover.opponent(), stats).score
        };

        if improves(score, best.score, mover) {
            best = SearchResult {
                score,
                best_move: Some(index),
            };
        }
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================
