//! Terminal-state evaluation

use crate::board::{Board, Cell, Side, LINES};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Classification of a board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Win(Side),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Wire representation of a finished game
    pub fn winner(self) -> Option<Winner> {
        match self {
            Outcome::InProgress => None,
            Outcome::Win(Side::X) => Some(Winner::X),
            Outcome::Win(Side::O) => Some(Winner::O),
            Outcome::Draw => Some(Winner::Draw),
        }
    }
}

/// Finished-game result as reported to clients: `"X"`, `"O"` or `"Draw"`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    X,
    O,
    Draw,
}

/// Classify a board.
///
/// Lines are checked in [`LINES`] order and a completed line wins even
/// when the board is also full.
pub fn evaluate(board: &Board) -> Outcome {
    let cells = board.cells();
    for [a, b, c] in LINES {
        if let Some(side) = cells[a].side() {
            if cells[a] == cells[b] && cells[a] == cells[c] {
                return Outcome::Win(side);
            }
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// [`evaluate`] over raw cells, rejecting anything but nine of them
pub fn evaluate_cells(cells: &[Cell]) -> Result<Outcome> {
    Ok(evaluate(&Board::from_cells(cells)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            for side in [Side::X, Side::O] {
                let mut b = Board::empty();
                for index in line {
                    b = b.play(index, side).unwrap();
                }
                assert_eq!(evaluate(&b), Outcome::Win(side), "line {:?}", line);
            }
        }
    }

    #[test]
    fn test_win_beats_full_board() {
        // Full board with X completing the top row
        let b = board("XXX/OOX/XOO");
        assert!(b.is_full());
        assert_eq!(evaluate(&b), Outcome::Win(Side::X));
    }

    #[test]
    fn test_draw() {
        let b = board("XOX/XOO/OXX");
        assert_eq!(evaluate(&b), Outcome::Draw);
        assert_eq!(evaluate(&b).winner(), Some(Winner::Draw));
    }

    #[test]
    fn test_in_progress() {
        assert_eq!(evaluate(&Board::empty()), Outcome::InProgress);
        assert_eq!(evaluate(&board("XOX/XOO/OX.")), Outcome::InProgress);
        assert!(!evaluate(&Board::empty()).is_terminal());
        assert_eq!(Outcome::InProgress.winner(), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        assert_eq!(evaluate(&board("XXO/.../...")), Outcome::InProgress);
    }

    #[test]
    fn test_first_line_in_order_reported() {
        // Two X lines at once: row 0 and column 0 share index 0
        let b = board("XXX/XOO/XOO");
        assert_eq!(evaluate(&b), Outcome::Win(Side::X));
    }

    #[test]
    fn test_evaluate_cells_checks_length() {
        assert_eq!(
            evaluate_cells(&[Cell::X; 4]),
            Err(EngineError::InvalidLength { len: 4 })
        );
        assert_eq!(evaluate_cells(&[Cell::O; 9]), Ok(Outcome::Win(Side::O)));
    }

    #[test]
    fn test_winner_wire_format() {
        assert_eq!(serde_json::to_string(&Winner::Draw).unwrap(), "\"Draw\"");
        assert_eq!(serde_json::to_string(&Winner::O).unwrap(), "\"O\"");
    }
}
