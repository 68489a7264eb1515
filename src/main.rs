// Plays one game on a board file and prints the result
//
// Usage:
//   cargo run --bin wargame -- <board_file> [--config <path>]

use log::{error, info};
use std::env;
use std::process;

use wargame::config::Config;
use wargame::game_runner::GameRunner;
use wargame::game_state::GameState;
use wargame::loader::load_board;

fn print_usage() {
    eprintln!("Wargame");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  wargame <board_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --config <path>    Path to Wargame.toml (default: Wargame.toml)");
    eprintln!("  --help             Show this help message");
}

fn run(board_path: &str, config: &Config) -> wargame::Result<()> {
    let board = load_board(board_path)?;
    let (first, second) = config.players.players();
    let state = GameState::new(first, second, board)?;

    let runner = GameRunner::from_config(config)?;
    let report = runner.play(state)?;
    report.print_summary();
    Ok(())
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let board_path = args[1].clone();
    let mut config_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = Some(path.clone()),
                    None => {
                        eprintln!("Error: --config requires a path");
                        process::exit(1);
                    }
                }
            }
            other => {
                eprintln!("Error: unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Config::load_or_default(),
    };

    info!("Starting game on {}", board_path);

    if let Err(e) = run(&board_path, &config) {
        error!("Game failed: {}", e);
        process::exit(1);
    }
}
