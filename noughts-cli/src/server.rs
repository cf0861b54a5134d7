//! Serve command - start the web server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to noughts-server crate)
//! - Level 4: static directory checks

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use noughts_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port number to listen on
    #[arg(long, default_value = "5000")]
    pub port: u16,

    /// Directory holding index.html
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting noughts server on {}:{}", config.host, config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        host: args.host,
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
    })
}

/// Start the server on a fresh tokio runtime (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    runtime.block_on(run_server(config))
}

// ============================================================================
// LEVEL 4 - STATIC DIRECTORY CHECKS
// ============================================================================

/// A missing directory only warns; a file in its place is an error
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. The page at / will 404.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    } else if !path.join("index.html").is_file() {
        tracing::warn!("No index.html in {}", path.display());
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_server() {
        let args = ServerArgs {
            host: "127.0.0.1".parse().unwrap(),
            port: 5001,
            static_dir: PathBuf::from("test_static"),
        };

        let config = configure_server(&args).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.static_dir, "test_static");
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        assert!(validate_static_dir(Path::new("/nonexistent/path")).is_ok());
    }

    #[test]
    fn test_validate_static_dir_rejects_file() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert!(validate_static_dir(&manifest).is_err());
    }
}
