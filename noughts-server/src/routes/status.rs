//! Liveness endpoint

use axum::Json;
use noughts_core::{Side, ENGINE, HUMAN};
use serde::Serialize;

/// Server identity plus which mark each side plays
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub engine: &'static str,
    pub human_mark: Side,
    pub engine_mark: Side,
}

pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        engine: "minimax",
        human_mark: HUMAN,
        engine_mark: ENGINE,
    })
}
