//! noughts CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the web server
//! - solve: Search a single position
//! - match: Play the engine against a random opponent
//! - verify: Prove the engine never loses

mod match_cmd;
mod server;
mod solve;
mod verify;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(about = "Unbeatable 3x3 noughts and crosses engine")]
#[command(version)]
struct Cli {
    /// Random seed for reproducible matches
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve(server::ServerArgs),
    /// Find the best move for a position
    Solve(solve::SolveArgs),
    /// Play the engine against a random opponent
    Match(match_cmd::MatchArgs),
    /// Play out every human line against the engine
    Verify(verify::VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Solve(args) => solve::run(args),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Verify(args) => verify::run(args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`)
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
