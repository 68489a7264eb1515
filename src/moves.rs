// Moves and state transitions
//
// A move is plain data. `apply` produces a new state and leaves its input
// untouched; `apply_in_place` + `undo` mutate a state and restore it, for
// searches that walk a single working copy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game_state::GameState;
use crate::types::{Coord, Seat};

/// One legal action for a player
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// Claim any unoccupied cell
    ParaDrop { player: Seat, target: Coord },
    /// Claim an unoccupied cell next to one the player owns, capturing every
    /// enemy-owned orthogonal neighbor of the target
    DeathBlitz {
        player: Seat,
        target: Coord,
        captures: Vec<Coord>,
    },
}

/// Everything `undo` needs to reverse an in-place move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDelta {
    mover: Seat,
    target: usize,
    captured: Vec<usize>,
    gained: i64,
    transferred: i64,
}

impl Move {
    pub fn player(&self) -> Seat {
        match self {
            Move::ParaDrop { player, .. } | Move::DeathBlitz { player, .. } => *player,
        }
    }

    pub fn target(&self) -> Coord {
        match self {
            Move::ParaDrop { target, .. } | Move::DeathBlitz { target, .. } => *target,
        }
    }

    /// Enemy cells this move was generated to capture (empty for ParaDrop)
    pub fn captures(&self) -> &[Coord] {
        match self {
            Move::ParaDrop { .. } => &[],
            Move::DeathBlitz { captures, .. } => captures.as_slice(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Move::ParaDrop { .. } => "ParaDrop",
            Move::DeathBlitz { .. } => "DeathBlitz",
        }
    }

    /// Returns the state that results from playing this move on `state`.
    ///
    /// # Panics
    /// If the target is off the board or already occupied. Move generation
    /// never offers such a move, so this is a caller bug.
    pub fn apply(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        self.apply_in_place(&mut next);
        next
    }

    /// Plays the move on `state` directly and returns the record needed to
    /// take it back with [`Move::undo`].
    ///
    /// Captures are resolved against the occupancy of `state` at this moment:
    /// every orthogonal neighbor of the target owned by the opponent flips to
    /// the mover. Capture is single-hop.
    ///
    /// # Panics
    /// Same contract as [`Move::apply`].
    pub fn apply_in_place(&self, state: &mut GameState) -> MoveDelta {
        let mover = self.player();
        let target = self.target();
        let idx = match state.board().index_of(target) {
            Some(idx) => idx,
            None => panic!("{} targets {} which is off the board", self.kind_name(), target),
        };
        if state.board().cell_at(idx).is_occupied() {
            panic!("{} targets occupied cell {}", self.kind_name(), target);
        }

        let gained = state.board().cell_at(idx).value() as i64;
        let captured: Vec<usize> = match self {
            Move::ParaDrop { .. } => Vec::new(),
            Move::DeathBlitz { .. } => state
                .board()
                .neighbor_indices(idx)
                .iter()
                .copied()
                .filter(|&n| state.board().cell_at(n).is_owned_by(mover.other()))
                .collect(),
        };
        let transferred: i64 = captured
            .iter()
            .map(|&n| state.board().cell_at(n).value() as i64)
            .sum();

        let board = state.board_mut();
        board.set_owner(idx, Some(mover));
        for &n in &captured {
            board.set_owner(n, Some(mover));
        }
        state.player_mut(mover).score += gained + transferred;
        state.player_mut(mover.other()).score -= transferred;

        MoveDelta {
            mover,
            target: idx,
            captured,
            gained,
            transferred,
        }
    }

    /// Reverses a move previously played with [`Move::apply_in_place`] on the
    /// same state. Deltas must be undone in reverse order of application.
    pub fn undo(state: &mut GameState, delta: MoveDelta) {
        let board = state.board_mut();
        board.set_owner(delta.target, None);
        for &n in &delta.captured {
            board.set_owner(n, Some(delta.mover.other()));
        }
        state.player_mut(delta.mover).score -= delta.gained + delta.transferred;
        state.player_mut(delta.mover.other()).score += delta.transferred;
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::ParaDrop { player, target } => {
                write!(f, "ParaDrop {} -> {}", player.marker(), target)
            }
            Move::DeathBlitz {
                player,
                target,
                captures,
            } => {
                let captured: Vec<String> = captures.iter().map(|c| c.to_string()).collect();
                write!(
                    f,
                    "DeathBlitz {} -> {} capturing [{}]",
                    player.marker(),
                    target,
                    captured.join(", ")
                )
            }
        }
    }
}
