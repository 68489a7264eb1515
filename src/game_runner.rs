// Game runner: plays one complete game between two searching players
//
// The first seat moves on even turns, the second on odd turns. Whoever is
// about to move is the maximizer for that turn's search.

use log::info;
use std::time::Instant;

use crate::agent::Agent;
use crate::config::Config;
use crate::error::Result;
use crate::game_log::GameLogger;
use crate::game_state::GameState;
use crate::moves::Move;
use crate::search::Algorithm;
use crate::types::{Evaluation, PlayerId, Seat};

/// What happened on one turn
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub turn: usize,
    pub seat: Seat,
    pub player: PlayerId,
    pub chosen: Move,
    pub value: Evaluation,
    pub expanded_nodes: u64,
    pub algorithm: Algorithm,
    pub depth: u32,
    pub duration_ms: u128,
}

/// Per-player totals over a game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerTotals {
    pub moves: usize,
    pub expanded_nodes: u64,
    pub duration_ms: u128,
}

/// Result of a complete game
#[derive(Debug, Clone)]
pub struct GameReport {
    pub final_state: GameState,
    pub records: Vec<MoveRecord>,
    pub totals: [PlayerTotals; 2],
    pub winner: PlayerId,
    pub winner_seat: Seat,
    pub duration_ms: u128,
}

impl GameReport {
    /// Prints the final board and a per-player summary
    pub fn print_summary(&self) {
        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    GAME SUMMARY");
        println!("═══════════════════════════════════════════════════════════");
        print!("{}", self.final_state.board());
        println!("───────────────────────────────────────────────────────────");
        for seat in Seat::all().iter() {
            let player = self.final_state.player(*seat);
            let totals = &self.totals[seat.index()];
            println!(
                "Player [{}] ({}): score {:>5}  moves {:>3}  expanded {:>10}  time {}ms",
                player.id,
                seat.marker(),
                player.score,
                totals.moves,
                totals.expanded_nodes,
                totals.duration_ms
            );
        }
        println!("Winning Player:      {} ({})", self.winner, self.winner_seat.marker());
        println!("Total game duration: {}ms", self.duration_ms);
        println!("═══════════════════════════════════════════════════════════\n");
    }
}

/// Drives the turn loop
pub struct GameRunner {
    agent: Agent,
    algorithms: [Algorithm; 2],
    logger: GameLogger,
}

impl GameRunner {
    pub fn new(agent: Agent, algorithms: [Algorithm; 2], logger: GameLogger) -> Self {
        GameRunner {
            agent,
            algorithms,
            logger,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(GameRunner::new(
            Agent::from_config(config)?,
            config.players.algorithms(),
            GameLogger::new(config.game_log.enabled, &config.game_log.log_file_path),
        ))
    }

    /// Plays `initial` to the end and reports the outcome
    pub fn play(&self, initial: GameState) -> Result<GameReport> {
        let start_time = Instant::now();
        info!(
            "GAME START: {} ({}) vs {} ({}) on {}x{}",
            initial.player(Seat::First).id,
            self.algorithms[0].as_str(),
            initial.player(Seat::Second).id,
            self.algorithms[1].as_str(),
            initial.board().rows(),
            initial.board().cols()
        );

        let mut state = initial;
        let mut records = Vec::new();
        let mut totals = [PlayerTotals::default(), PlayerTotals::default()];
        let mut turn = 0;

        while !state.is_terminal() {
            let seat = if turn % 2 == 0 { Seat::First } else { Seat::Second };
            let move_start = Instant::now();
            let decision = self.agent.choose_move(&state, seat, self.algorithms[seat.index()])?;
            let duration_ms = move_start.elapsed().as_millis();

            let player = state.player(seat).id.clone();
            state = decision.next_state;
            self.logger.log_move(
                turn,
                &player,
                &decision.chosen,
                decision.value,
                decision.expanded_nodes,
                &state,
            );

            let seat_totals = &mut totals[seat.index()];
            seat_totals.moves += 1;
            seat_totals.expanded_nodes += decision.expanded_nodes;
            seat_totals.duration_ms += duration_ms;

            records.push(MoveRecord {
                turn,
                seat,
                player,
                chosen: decision.chosen,
                value: decision.value,
                expanded_nodes: decision.expanded_nodes,
                algorithm: decision.algorithm,
                depth: decision.depth,
                duration_ms,
            });
            turn += 1;
        }

        let winner = state.leading_player().id.clone();
        let winner_seat = state.seat_of(&winner)?;
        info!(
            "GAME OVER after {} moves: {} {} - {} {}, winner {}",
            turn,
            state.player(Seat::First).id,
            state.player(Seat::First).score,
            state.player(Seat::Second).score,
            state.player(Seat::Second).id,
            winner
        );

        Ok(GameReport {
            final_state: state,
            records,
            totals,
            winner,
            winner_seat,
            duration_ms: start_time.elapsed().as_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyConfig;
    use crate::search::{SearchConfig, StateMode};
    use crate::types::Player;

    fn runner(algorithms: [Algorithm; 2]) -> GameRunner {
        let agent = Agent::new(
            SearchConfig::new(2, 3, StateMode::Copy).unwrap(),
            StrategyConfig {
                parallel_root: false,
                min_cpus_for_parallel: 2,
            },
        );
        GameRunner::new(agent, algorithms, GameLogger::disabled())
    }

    #[test]
    fn test_one_by_two_game() {
        let state = GameState::from_values(vec![vec![5, 3]], Player::new("p1"), Player::new("p2")).unwrap();
        let report = runner([Algorithm::Minimax, Algorithm::Minimax]).play(state).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.final_state.player(Seat::First).score, 5);
        assert_eq!(report.final_state.player(Seat::Second).score, 3);
        assert_eq!(report.winner, PlayerId::from("p1"));
        assert_eq!(report.winner_seat, Seat::First);
        assert_eq!(report.totals[0].moves, 1);
        assert_eq!(report.totals[1].moves, 1);
    }

    #[test]
    fn test_players_alternate_and_fill_the_board() {
        let values = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let state = GameState::from_values(values, Player::new("p1"), Player::new("p2")).unwrap();
        let report = runner([Algorithm::AlphaBeta, Algorithm::Minimax]).play(state).unwrap();

        assert!(report.final_state.is_terminal());
        assert_eq!(report.records.len(), 6);
        for (i, record) in report.records.iter().enumerate() {
            let expected = if i % 2 == 0 { Seat::First } else { Seat::Second };
            assert_eq!(record.seat, expected);
            assert_eq!(record.chosen.player(), expected);
        }
        assert_eq!(report.records[0].algorithm, Algorithm::AlphaBeta);
        assert_eq!(report.records[0].depth, 3);
        assert_eq!(report.records[1].algorithm, Algorithm::Minimax);
        assert_eq!(report.records[1].depth, 2);

        let board_total: i64 = 21;
        let scores = report.final_state.player(Seat::First).score + report.final_state.player(Seat::Second).score;
        assert_eq!(scores, board_total);
    }
}
