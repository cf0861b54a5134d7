//! Transposition-cached solver
//!
//! Same recursion and tie-breaking as [`crate::search::search`], with each
//! (board, mover) result remembered. Only 3^9 boards exist, so the table
//! never needs eviction.

use crate::board::{Board, Cell, Side, BOARD_CELLS};
use crate::outcome::evaluate;
use crate::search::{improves, initial_best, terminal_score, Placed, SearchResult};
use rustc_hash::FxHashMap;

/// Minimax solver that reuses results across calls
#[derive(Debug, Default)]
pub struct Solver {
    table: FxHashMap<(Board, Side), SearchResult>,
    hits: u64,
    misses: u64,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimal move for `mover`; identical to an uncached search
    pub fn solve(&mut self, board: &Board, mover: Side) -> SearchResult {
        let mut scratch = *board;
        self.solve_node(&mut scratch, mover)
    }

    /// Number of cached positions
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn solve_node(&mut self, board: &mut Board, mover: Side) -> SearchResult {
        if let Some(&cached) = self.table.get(&(*board, mover)) {
            self.hits += 1;
            return cached;
        }
        self.misses += 1;

        let result = match terminal_score(evaluate(board)) {
            Some(score) => SearchResult {
                score,
                best_move: None,
            },
            None => {
                let mut best = initial_best(mover);
                for index in 0..BOARD_CELLS {
                    if board.get(index) != Some(Cell::Empty) {
                        continue;
                    }
                    let score = {
                        let mut placed = Placed::new(board, index, mover);
                        self.solve_node(&mut placed, mover.opponent()).score
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
        };

        self.table.insert((*board, mover), result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ENGINE, HUMAN};
    use crate::search::search;

    #[test]
    fn test_matches_plain_search_on_openings() {
        let mut solver = Solver::new();
        let openings = ["", "X", "....X", "X.......O", "XX..O", ".X.O"];
        for notation in openings {
            let padded = format!("{:.<9}", notation);
            let board: Board = padded.parse().unwrap();
            for mover in [ENGINE, HUMAN] {
                assert_eq!(
                    solver.solve(&board, mover),
                    search(&board, mover),
                    "{} {:?}",
                    padded,
                    mover
                );
            }
        }
    }

    #[test]
    fn test_cache_is_reused() {
        let mut solver = Solver::new();
        assert!(solver.is_empty());

        let first = solver.solve(&Board::empty(), ENGINE);
        let misses = solver.misses();
        assert!(solver.len() > 0);
        // Transpositions are hit even on the first solve
        assert!(solver.hits() > 0);

        let second = solver.solve(&Board::empty(), ENGINE);
        assert_eq!(first, second);
        assert_eq!(solver.misses(), misses);

        solver.clear();
        assert!(solver.is_empty());
        assert_eq!(solver.hits(), 0);
    }

    #[test]
    fn test_caller_board_untouched() {
        let mut solver = Solver::new();
        let board: Board = "X...O....".parse().unwrap();
        let copy = board;
        solver.solve(&board, HUMAN);
        assert_eq!(board, copy);
    }
}
