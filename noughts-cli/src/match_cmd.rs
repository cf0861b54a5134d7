//! Match command - engine against a random opponent
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: RNG and formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use noughts_core::{engine_reply, evaluate, Board, Outcome, Side, ENGINE, HUMAN};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play (alternating who moves first)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    engine_first: bool,
    outcome: Outcome,
    /// Cell indices in play order
    moves: Vec<usize>,
    final_board: Board,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    engine_wins: usize,
    engine_losses: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the games
/// 2. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!("Starting match: {} games, seed={:?}", args.games, seed);

    let results = play_match(args.games, seed)?;

    report_results(&results, args.json);

    if results.engine_losses > 0 {
        tracing::warn!("Engine lost {} games", results.engine_losses);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games; the engine opens every other game
fn play_match(games: usize, seed: Option<u64>) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let mut records = Vec::with_capacity(games);

    for game_num in 0..games {
        let engine_first = game_num % 2 == 1;
        let record = play_single_game(game_num + 1, engine_first, &mut rng)?;

        tracing::info!(
            "Game {}: {:?} in {} moves ({})",
            record.game_number,
            record.outcome,
            record.moves.len(),
            record.final_board.to_notation()
        );

        records.push(record);
    }

    Ok(compute_match_statistics(records))
}

/// Report match results
fn report_results(results: &MatchResults, json: bool) {
    if json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game: random X against the engine's O
fn play_single_game(
    game_number: usize,
    engine_first: bool,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let mut board = Board::empty();
    let mut mover = if engine_first { ENGINE } else { HUMAN };
    let mut moves = Vec::new();

    while !evaluate(&board).is_terminal() {
        if mover == ENGINE {
            let reply = engine_reply(&board)?;
            let index = reply
                .index
                .context("engine returned no move on an unfinished board")?;
            moves.push(index);
            board = reply.board;
        } else {
            let index = random_move(&board, rng).context("no empty cell on an unfinished board")?;
            moves.push(index);
            board = board.play(index, HUMAN)?;
        }
        mover = mover.opponent();
    }

    Ok(GameRecord {
        game_number,
        engine_first,
        outcome: evaluate(&board),
        moves,
        final_board: board,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |pred: fn(Outcome) -> bool| games.iter().filter(|g| pred(g.outcome)).count();

    let engine_wins = count(|o| o == Outcome::Win(ENGINE));
    let engine_losses = count(|o| o == Outcome::Win(HUMAN));
    let draws = count(|o| o == Outcome::Draw);

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        engine_wins,
        engine_losses,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Uniformly random empty cell
fn random_move(board: &Board, rng: &mut ChaCha8Rng) -> Option<usize> {
    let empties: Vec<usize> = board.empty_cells().collect();
    empties.choose(rng).copied()
}

fn outcome_label(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win(side) if side == ENGINE => format!("engine ({}) wins", side),
        Outcome::Win(side) => format!("random ({}) wins", side),
        Outcome::Draw => "draw".to_string(),
        Outcome::InProgress => "unfinished".to_string(),
    }
}

fn first_mover(record: &GameRecord) -> Side {
    if record.engine_first {
        ENGINE
    } else {
        HUMAN
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        first: Side,
        result: String,
        moves: Vec<usize>,
        board: Board,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        engine_wins: usize,
        engine_losses: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        engine_wins: results.engine_wins,
        engine_losses: results.engine_losses,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                first: first_mover(g),
                result: outcome_label(g.outcome),
                moves: g.moves.clone(),
                board: g.final_board,
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize results: {}", e),
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();
    let pct = |n: usize| {
        if total > 0 {
            n as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Match Results ===");
    println!("Total games:   {}", total);
    println!("Engine wins:   {} ({:.1}%)", results.engine_wins, pct(results.engine_wins));
    println!("Engine losses: {} ({:.1}%)", results.engine_losses, pct(results.engine_losses));
    println!("Draws:         {} ({:.1}%)", results.draws, pct(results.draws));
    println!("Avg moves:     {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {} ({} first): {} in {} moves",
            game.game_number,
            first_mover(game),
            outcome_label(game.outcome),
            game.moves.len()
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: Outcome, moves: usize) -> GameRecord {
        GameRecord {
            game_number: 1,
            engine_first: false,
            outcome,
            moves: (0..moves).collect(),
            final_board: Board::empty(),
        }
    }

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.engine_wins, 0);
        assert_eq!(results.engine_losses, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            record(Outcome::Win(ENGINE), 6),
            record(Outcome::Draw, 9),
            record(Outcome::Win(ENGINE), 6),
        ];

        let results = compute_match_statistics(games);
        assert_eq!(results.engine_wins, 2);
        assert_eq!(results.engine_losses, 0);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_moves, 7.0);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));

        use rand::Rng;
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_engine_never_loses_random_games() {
        let results = play_match(20, Some(7)).unwrap();
        assert_eq!(results.games.len(), 20);
        assert_eq!(results.engine_losses, 0);
        for game in &results.games {
            assert!(game.outcome.is_terminal());
        }
    }

    #[test]
    fn test_seeded_match_is_reproducible() {
        let a = play_match(4, Some(99)).unwrap();
        let b = play_match(4, Some(99)).unwrap();
        let moves = |r: &MatchResults| r.games.iter().map(|g| g.moves.clone()).collect::<Vec<_>>();
        assert_eq!(moves(&a), moves(&b));
    }

    #[test]
    fn test_random_move_on_full_board() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        let mut rng = create_rng(Some(1));
        assert_eq!(random_move(&board, &mut rng), None);
    }
}
