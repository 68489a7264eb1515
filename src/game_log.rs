// Game log: one JSON line per move
//
// Each entry carries the mover, the move, search statistics and a snapshot
// of the resulting state, so a game can be inspected or rendered afterwards.

use log::{error, info};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, WargameError};
use crate::game_state::GameState;
use crate::moves::Move;
use crate::types::{PlayerId, StateSnapshot};

/// Represents a single game log entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GameLogEntry {
    pub turn: usize,
    pub player: PlayerId,
    pub chosen_move: Move,
    pub value: i64,
    pub expanded_nodes: u64,
    pub state: StateSnapshot,
    pub timestamp: String,
}

/// Shared game logger state
/// Cloned loggers append to the same file
#[derive(Clone)]
pub struct GameLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl GameLogger {
    /// Creates a new game logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                info!("Game logging enabled: {}", log_file_path);
                GameLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create game log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled game logger (no-op)
    pub fn disabled() -> Self {
        GameLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends one move to the log. Write failures are logged, not returned:
    /// a broken game log never stops a game.
    pub fn log_move(
        &self,
        turn: usize,
        player: &PlayerId,
        chosen_move: &Move,
        value: i64,
        expanded_nodes: u64,
        state: &GameState,
    ) {
        if !self.enabled {
            return;
        }

        let entry = GameLogEntry {
            turn,
            player: player.clone(),
            chosen_move: chosen_move.clone(),
            value,
            expanded_nodes,
            state: state.snapshot(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let mut file_guard = self.file.lock();
        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    if let Err(e) = writeln!(file, "{}", json_line).and_then(|_| file.flush()) {
                        error!("Failed to write game log entry: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize game log entry: {}", e);
                }
            }
        }
    }

    /// Loads all entries from a JSONL game log
    pub fn load<P: AsRef<Path>>(log_path: P) -> Result<Vec<GameLogEntry>> {
        let file = File::open(log_path.as_ref())?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: GameLogEntry = serde_json::from_str(&line).map_err(|e| {
                WargameError::Config(format!("Failed to parse JSON on line {}: {}", line_num + 1, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}
