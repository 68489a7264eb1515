use thiserror::Error;

/// Errors raised while building boards, states and configuration.
///
/// The search itself has no failure modes; everything here is rejected
/// before a search is ever started.
#[derive(Error, Debug)]
pub enum WargameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedBoard {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Depth limit '{name}' must not be negative (got {depth})")]
    InvalidDepth { name: &'static str, depth: i64 },

    #[error("Unknown player id: {0}")]
    UnknownPlayer(String),

    #[error("Player '{player}' has score {score} but owns cells worth {owned}")]
    ScoreMismatch { player: String, score: i64, owned: i64 },

    #[error("Both players share the id '{0}'")]
    DuplicatePlayerId(String),

    #[error("Invalid cell value '{token}' on line {line}")]
    Parse { line: usize, token: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Convenience Result type for wargame operations
pub type Result<T> = std::result::Result<T, WargameError>;
