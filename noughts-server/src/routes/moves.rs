//! Engine move endpoint
//!
//! Accepts `{ "board": [9 cells] }` and answers with the engine's reply.
//! Each request is searched on its own board copy on the blocking pool.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use noughts_core::{engine_reply, Board, EngineError, Reply, BOARD_CELLS};
use serde::Deserialize;
use serde_json::{json, Value};

/// Message for any board that is not a nine-element list
const BAD_SHAPE: &str = "board must be list of length 9";

/// Move request body
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub board: Option<Value>,
}

/// Error response with a JSON `{ "error": ... }` body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidLength { .. } => Self::bad_request(BAD_SHAPE),
            other if other.is_invalid_input() => Self::bad_request(other.to_string()),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Compute and apply the engine's move
pub async fn make_move(
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<Reply>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("rejected move request: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;

    let board = parse_board(request.board.as_ref())?;

    let reply = tokio::task::spawn_blocking(move || engine_reply(&board))
        .await
        .map_err(|e| {
            tracing::error!("engine task failed: {}", e);
            ApiError::internal("engine task failed")
        })??;

    tracing::info!(
        board = %board.to_notation(),
        index = ?reply.index,
        winner = ?reply.winner,
        "engine replied"
    );

    Ok(Json(reply))
}

/// Validate the request's board field
fn parse_board(board: Option<&Value>) -> Result<Board, ApiError> {
    let cells = match board {
        Some(Value::Array(cells)) if cells.len() == BOARD_CELLS => cells,
        _ => return Err(ApiError::bad_request(BAD_SHAPE)),
    };

    let symbols = cells
        .iter()
        .map(|cell| match cell {
            Value::String(s) => Ok(s.as_str()),
            other => Err(EngineError::InvalidCell {
                symbol: other.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Board::from_symbols(&symbols)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board_shapes() {
        assert!(parse_board(None).is_err());
        assert!(parse_board(Some(&json!("XX.......")))
            .is_err_and(|e| e.message == BAD_SHAPE));
        assert!(parse_board(Some(&json!(["X", "O"])))
            .is_err_and(|e| e.message == BAD_SHAPE));
        assert!(parse_board(Some(&json!(["", "", "", "", "", "", "", "", ""]))).is_ok());
    }

    #[test]
    fn test_parse_board_rejects_bad_cells() {
        let err = parse_board(Some(&json!(["X", 1, "", "", "", "", "", "", ""]))).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("invalid cell"));

        let err = parse_board(Some(&json!(["x", "", "", "", "", "", "", "", ""]))).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_illegal_move_is_internal() {
        let err = ApiError::from(EngineError::IllegalMove { index: 3 });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
