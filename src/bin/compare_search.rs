//! Compares minimax and alpha-beta on one position
//!
//! Reports the root value, expanded nodes, cutoffs and wall time of both
//! algorithms under both state modes, then the move each would choose.
//!
//! Usage:
//!   compare_search --board <path> [--depth N]
//!   compare_search --random <rows> <cols> <seed> [--depth N] [--max-value V]

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;
use std::time::Instant;

use wargame::agent::{Agent, ExecutionStrategy};
use wargame::board::Board;
use wargame::config::StrategyConfig;
use wargame::game_state::GameState;
use wargame::loader::load_board;
use wargame::search::{Algorithm, SearchConfig, SearchEngine, StateMode};
use wargame::types::{Player, Roles, Seat};

struct Options {
    board: Board,
    depth: u32,
}

fn print_usage() {
    eprintln!("Search Comparison Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  compare_search --board <path> [--depth N]");
    eprintln!("  compare_search --random <rows> <cols> <seed> [--depth N] [--max-value V]");
}

fn parse_number<T: std::str::FromStr>(args: &[String], idx: usize, what: &str) -> Result<T, String> {
    args.get(idx)
        .ok_or_else(|| format!("Missing {}", what))?
        .parse::<T>()
        .map_err(|_| format!("Invalid {}: '{}'", what, args[idx]))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut board_path: Option<String> = None;
    let mut random: Option<(usize, usize, u64)> = None;
    let mut depth: i64 = 3;
    let mut max_value: u32 = 9;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--board" => {
                board_path = Some(args.get(i + 1).ok_or("Missing board path")?.clone());
                i += 2;
            }
            "--random" => {
                random = Some((
                    parse_number(args, i + 1, "rows")?,
                    parse_number(args, i + 2, "cols")?,
                    parse_number(args, i + 3, "seed")?,
                ));
                i += 4;
            }
            "--depth" => {
                depth = parse_number(args, i + 1, "depth")?;
                i += 2;
            }
            "--max-value" => {
                max_value = parse_number(args, i + 1, "max value")?;
                i += 2;
            }
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    let depth = SearchConfig::new(depth, depth, StateMode::Copy)
        .map_err(|e| e.to_string())?
        .minimax_depth;

    let board = match (board_path, random) {
        (Some(path), None) => load_board(&path).map_err(|e| e.to_string())?,
        (None, Some((rows, cols, seed))) => {
            let mut rng = StdRng::seed_from_u64(seed);
            Board::new(Board::random_values(rows, cols, max_value, &mut rng)).map_err(|e| e.to_string())?
        }
        _ => return Err("Specify exactly one of --board or --random".to_string()),
    };

    Ok(Options { board, depth })
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help") {
        print_usage();
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let state = match GameState::new(Player::new("player1"), Player::new("player2"), options.board) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let roles = Roles::new(Seat::First);

    println!("\n═══════════════════════════════════════════════════════════");
    println!("        MINIMAX vs ALPHA-BETA (depth {})", options.depth);
    println!("═══════════════════════════════════════════════════════════");
    print!("{}", state.board());
    println!("───────────────────────────────────────────────────────────");
    println!("{:<12} {:<6} {:>8} {:>12} {:>10} {:>10}", "algorithm", "states", "value", "expanded", "cutoffs", "time(ms)");

    for &mode in &[StateMode::Copy, StateMode::Undo] {
        let engine = SearchEngine::new(mode);
        for &algorithm in &[Algorithm::Minimax, Algorithm::AlphaBeta] {
            let start = Instant::now();
            let outcome = engine.search(&state, roles, options.depth, algorithm == Algorithm::AlphaBeta);
            println!(
                "{:<12} {:<6} {:>8} {:>12} {:>10} {:>10}",
                algorithm.as_str(),
                format!("{:?}", engine.state_mode()).to_lowercase(),
                outcome.value,
                outcome.expanded_nodes,
                outcome.cutoffs,
                start.elapsed().as_millis()
            );
        }
    }

    println!("───────────────────────────────────────────────────────────");
    let search = match SearchConfig::new(options.depth as i64, options.depth as i64, StateMode::Copy) {
        Ok(search) => search,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let agent = Agent::new(
        search,
        StrategyConfig {
            parallel_root: true,
            min_cpus_for_parallel: 2,
        },
    );
    for &algorithm in &[Algorithm::Minimax, Algorithm::AlphaBeta] {
        match agent.choose_move_with(&state, Seat::First, algorithm, ExecutionStrategy::ParallelRoot) {
            Ok(decision) => println!(
                "{:<12} chooses {} (value {}, expanded {})",
                algorithm.as_str(),
                decision.chosen,
                decision.value,
                decision.expanded_nodes
            ),
            Err(e) => println!("{:<12} {}", algorithm.as_str(), e),
        }
    }
    println!("═══════════════════════════════════════════════════════════\n");
}
