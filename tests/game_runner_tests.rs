//! Game Runner Tests
//!
//! Plays whole games from configuration and board files, with the JSONL
//! game log switched on, and checks the report against the log.

use wargame::config::Config;
use wargame::game_log::GameLogger;
use wargame::game_runner::GameRunner;
use wargame::game_state::GameState;
use wargame::loader::load_board;
use wargame::search::Algorithm;
use wargame::types::{PlayerId, Seat};

fn temp_log_path(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("wargame_runner_{}_{}.jsonl", name, std::process::id()))
        .to_string_lossy()
        .into_owned()
}

fn config_with_log(log_path: &str, parallel_root: bool) -> Config {
    let toml = format!(
        r#"
[search]
minimax_depth = 1
alpha_beta_depth = 2
state_mode = "undo"

[players]
player_one_id = "north"
player_two_id = "south"
player_one_alpha_beta = true
player_two_alpha_beta = false

[strategy]
parallel_root = {}
min_cpus_for_parallel = 1

[game_log]
enabled = true
log_file_path = "{}"
"#,
        parallel_root,
        log_path.replace('\\', "\\\\")
    );
    Config::from_toml_str(&toml).unwrap()
}

fn new_game(config: &Config, board_path: &str) -> GameState {
    let (first, second) = config.players.players();
    GameState::new(first, second, load_board(board_path).unwrap()).unwrap()
}

#[test]
fn test_full_game_on_board_file_is_logged() {
    let path = temp_log_path("keep");
    let config = config_with_log(&path, false);
    let runner = GameRunner::from_config(&config).unwrap();

    let report = runner.play(new_game(&config, "boards/keep.txt")).unwrap();
    let final_state = &report.final_state;

    assert!(final_state.is_terminal());
    assert_eq!(report.records.len(), 16);
    assert_eq!(report.totals[0].moves, 8);
    assert_eq!(report.totals[1].moves, 8);

    let first = final_state.player(Seat::First);
    let second = final_state.player(Seat::Second);
    assert_eq!(first.score + second.score, final_state.board().occupied_value());
    let expected_winner = if first.score >= second.score { &first.id } else { &second.id };
    assert_eq!(&report.winner, expected_winner);
    assert_eq!(final_state.player(report.winner_seat).id, report.winner);

    assert_eq!(report.records[0].player, PlayerId::from("north"));
    assert_eq!(report.records[0].algorithm, Algorithm::AlphaBeta);
    assert_eq!(report.records[1].player, PlayerId::from("south"));
    assert_eq!(report.records[1].algorithm, Algorithm::Minimax);

    let entries = GameLogger::load(&path).unwrap();
    assert_eq!(entries.len(), report.records.len());
    for (entry, record) in entries.iter().zip(&report.records) {
        assert_eq!(entry.turn, record.turn);
        assert_eq!(entry.player, record.player);
        assert_eq!(entry.chosen_move, record.chosen);
        assert_eq!(entry.value, record.value);
        assert_eq!(entry.expanded_nodes, record.expanded_nodes);
    }
    let last = entries.last().unwrap();
    assert_eq!(last.state, final_state.snapshot());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_parallel_root_plays_the_same_game() {
    let seq_path = temp_log_path("seq");
    let par_path = temp_log_path("par");
    let seq_config = config_with_log(&seq_path, false);
    let par_config = config_with_log(&par_path, true);

    let sequential = GameRunner::from_config(&seq_config)
        .unwrap()
        .play(new_game(&seq_config, "boards/crossroads.txt"))
        .unwrap();
    let parallel = GameRunner::from_config(&par_config)
        .unwrap()
        .play(new_game(&par_config, "boards/crossroads.txt"))
        .unwrap();

    assert_eq!(sequential.final_state, parallel.final_state);
    assert_eq!(sequential.winner, parallel.winner);
    let seq_moves: Vec<_> = sequential.records.iter().map(|r| r.chosen.clone()).collect();
    let par_moves: Vec<_> = parallel.records.iter().map(|r| r.chosen.clone()).collect();
    assert_eq!(seq_moves, par_moves);

    let _ = std::fs::remove_file(&seq_path);
    let _ = std::fs::remove_file(&par_path);
}
