//! Engine error types

use thiserror::Error;

/// Errors raised by the engine's checked entry points
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Board does not have exactly nine cells
    #[error("board must be list of length 9 (got {len})")]
    InvalidLength { len: usize },

    /// Cell value outside {"", "X", "O"}
    #[error("invalid cell value: {symbol:?}")]
    InvalidCell { symbol: String },

    /// Mover is not one of the two sides
    #[error("mover must be X or O")]
    InvalidMover,

    /// Move index outside 0..=8
    #[error("move index {index} is out of range 0..=8")]
    IndexOutOfRange { index: usize },

    /// Placing on an occupied cell
    #[error("cell {index} is already occupied")]
    IllegalMove { index: usize },
}

impl EngineError {
    /// True for every error in the invalid-input class
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, EngineError::IllegalMove { .. })
    }
}

/// Engine operation result type
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(EngineError::InvalidLength { len: 8 }.is_invalid_input());
        assert!(EngineError::InvalidMover.is_invalid_input());
        assert!(EngineError::IndexOutOfRange { index: 9 }.is_invalid_input());
        assert!(!EngineError::IllegalMove { index: 4 }.is_invalid_input());
    }

    #[test]
    fn test_length_message_matches_wire_text() {
        let msg = EngineError::InvalidLength { len: 3 }.to_string();
        assert!(msg.starts_with("board must be list of length 9"));
    }
}
