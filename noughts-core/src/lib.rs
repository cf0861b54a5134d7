//! noughts core - 3x3 game engine
//!
//! This crate provides the engine behind the noughts server:
//! - Board, cells and the eight winning lines
//! - Terminal-state evaluation
//! - Exhaustive minimax search for the engine's move
//! - A transposition-cached solver for bulk analysis
//! - The engine-turn flow used by the HTTP `/move` endpoint

pub mod board;
pub mod error;
pub mod outcome;
pub mod search;
pub mod table;
pub mod turn;

// Re-exports for convenient access
pub use board::{coords, Board, Cell, Side, BOARD_CELLS, ENGINE, HUMAN, LINES};
pub use error::{EngineError, Result};
pub use outcome::{evaluate, evaluate_cells, Outcome, Winner};
pub use search::{
    search, search_cells, search_with_stats, terminal_score, Score, SearchResult, SearchStats,
    DRAW_SCORE, LOSS_SCORE, WIN_SCORE,
};
pub use table::Solver;
pub use turn::{engine_reply, engine_reply_cells, Reply};
