// Shared value types for the territory-capture game
//
// Players, coordinates, search roles and the read-only snapshots handed to
// renderers and loggers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value assigned to a state by the search. Scores can go negative after
/// captures, so this is signed and wide enough for any realistic board.
pub type Evaluation = i64;

/// Stable identity of a player
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId(id.to_string())
    }
}

/// One of the two seats at the table.
///
/// Cells and moves refer to players by seat; the `GameState` maps a seat to
/// the `Player` sitting in it.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// Both seats, in turn order
    pub fn all() -> [Seat; 2] {
        [Seat::First, Seat::Second]
    }

    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// Single-character marker used when printing boards
    pub fn marker(self) -> char {
        match self {
            Seat::First => 'A',
            Seat::Second => 'B',
        }
    }
}

/// Board position, row-major
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// True when the two coordinates share an edge (no diagonals)
    pub fn is_orthogonal_neighbor(&self, other: &Coord) -> bool {
        let dr = if self.row > other.row { self.row - other.row } else { other.row - self.row };
        let dc = if self.col > other.col { self.col - other.col } else { other.col - self.col };
        dr + dc == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A player and their running score
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub score: i64,
}

impl Player {
    pub fn new(id: impl Into<String>) -> Self {
        Player {
            id: PlayerId::new(id),
            score: 0,
        }
    }
}

/// Which seat the current search maximizes for.
///
/// Assigned by the caller for each search invocation: the maximizer is
/// whoever is about to move, not a fixed identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    pub maximizer: Seat,
}

impl Roles {
    pub fn new(maximizer: Seat) -> Self {
        Roles { maximizer }
    }

    pub fn minimizer(&self) -> Seat {
        self.maximizer.other()
    }

    /// The seat that moves at a node of the given kind
    pub fn mover(&self, node: NodeKind) -> Seat {
        match node {
            NodeKind::Max => self.maximizer,
            NodeKind::Min => self.minimizer(),
        }
    }
}

/// Kind of an interior search node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Max,
    Min,
}

impl NodeKind {
    pub fn flip(self) -> Self {
        match self {
            NodeKind::Max => NodeKind::Min,
            NodeKind::Min => NodeKind::Max,
        }
    }
}

/// Read-only view of one cell, for renderers and logs
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
pub struct CellSnapshot {
    pub row: usize,
    pub col: usize,
    pub value: u32,
    pub owner: Option<PlayerId>,
}

/// Read-only view of a whole game state
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
pub struct StateSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellSnapshot>,
    pub players: Vec<Player>,
}
