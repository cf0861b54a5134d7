//! noughts server - HTTP front for the engine
//!
//! This crate provides the web backend:
//! - `POST /move`: validate a board and answer with the engine's move
//! - `GET /api/status`: liveness and version
//! - Static file serving for the browser page

mod routes;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_http::services::ServeDir;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            static_dir: "static".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Engine move
        .route("/move", post(routes::moves::make_move))
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::new(config.host, config.port);
    let router = create_router(&config);

    tracing::info!("noughts server starting on http://{}", addr);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router).await?;

    Ok(())
}
