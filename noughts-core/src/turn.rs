//! Engine turn: answer a human move with the engine's reply

use crate::board::{Board, Cell, ENGINE};
use crate::error::Result;
use crate::outcome::{evaluate, Winner};
use crate::search::search;
use serde::{Deserialize, Serialize};

/// Response to a move request.
///
/// Serializes as `{ "index": n | null, "board": [...], "winner": ... }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Cell the engine played, `None` if it did not move
    pub index: Option<usize>,
    pub board: Board,
    /// `None` while the game continues
    pub winner: Option<Winner>,
}

/// Play the engine's move on `board`.
///
/// A board that is already decided comes back unchanged and no search is
/// run.
pub fn engine_reply(board: &Board) -> Result<Reply> {
    if let Some(winner) = evaluate(board).winner() {
        tracing::debug!(board = %board.to_notation(), ?winner, "game already finished");
        return Ok(Reply {
            index: None,
            board: *board,
            winner: Some(winner),
        });
    }

    let Some(index) = search(board, ENGINE).best_move else {
        return Ok(Reply {
            index: None,
            board: *board,
            winner: Some(Winner::Draw),
        });
    };

    let next = board.play(index, ENGINE)?;

    Ok(Reply {
        index: Some(index),
        board: next,
        winner: evaluate(&next).winner(),
    })
}

/// [`engine_reply`] over raw cells
pub fn engine_reply_cells(cells: &[Cell]) -> Result<Reply> {
    engine_reply(&Board::from_cells(cells)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_finished_game_is_returned_unchanged() {
        let won = board("XXX/OO./...");
        let reply = engine_reply(&won).unwrap();
        assert_eq!(reply.index, None);
        assert_eq!(reply.board, won);
        assert_eq!(reply.winner, Some(Winner::X));

        let drawn = board("XOX/XOO/OXX");
        let reply = engine_reply(&drawn).unwrap();
        assert_eq!(reply.index, None);
        assert_eq!(reply.winner, Some(Winner::Draw));
    }

    #[test]
    fn test_engine_blocks() {
        let reply = engine_reply(&board("XX./.O./...")).unwrap();
        assert_eq!(reply.index, Some(2));
        assert_eq!(reply.board, board("XXO/.O./..."));
        assert_eq!(reply.winner, None);
    }

    #[test]
    fn test_engine_wins() {
        let reply = engine_reply(&board("XX./OO./X..")).unwrap();
        assert_eq!(reply.index, Some(5));
        assert_eq!(reply.winner, Some(Winner::O));
    }

    #[test]
    fn test_last_cell_draws() {
        // One cell left; filling it completes no line
        let reply = engine_reply(&board("XOX/XOO/OX.")).unwrap();
        assert_eq!(reply.index, Some(8));
        assert_eq!(reply.winner, Some(Winner::Draw));
    }

    #[test]
    fn test_reply_wire_shape() {
        let reply = engine_reply(&board("XX./.O./...")).unwrap();
        let json = serde_json::to_value(reply).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "index": 2,
                "board": ["X", "X", "O", "", "O", "", "", "", ""],
                "winner": null
            })
        );
    }

    #[test]
    fn test_engine_reply_cells_validates() {
        assert_eq!(
            engine_reply_cells(&[Cell::Empty; 2]),
            Err(EngineError::InvalidLength { len: 2 })
        );
    }
}
