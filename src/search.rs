// Adversarial search: depth-limited minimax and alpha-beta
//
// The engine values states, not moves. A node is either evaluated (terminal
// or out of depth) or expanded into the children of whichever seat moves at
// that node kind. Counters record every child state produced.

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::{max, min};
use std::convert::TryFrom;

use crate::error::{Result, WargameError};
use crate::game_state::GameState;
use crate::moves::Move;
use crate::types::{Evaluation, NodeKind, Roles};

/// Search algorithm
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

impl Algorithm {
    pub fn from_alpha_beta_flag(use_alpha_beta: bool) -> Self {
        if use_alpha_beta {
            Algorithm::AlphaBeta
        } else {
            Algorithm::Minimax
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alpha-beta",
        }
    }
}

/// How the engine produces child states
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StateMode {
    /// A new state per child (the reference behavior)
    Copy,
    /// One working copy per search, moves applied in place and undone
    Undo,
}

/// Validated depth limits and state mode for a search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub minimax_depth: u32,
    pub alpha_beta_depth: u32,
    pub state_mode: StateMode,
}

impl SearchConfig {
    /// # Errors
    /// * `InvalidDepth` - either depth is negative or too large for `u32`
    pub fn new(minimax_depth: i64, alpha_beta_depth: i64, state_mode: StateMode) -> Result<Self> {
        Ok(SearchConfig {
            minimax_depth: Self::checked_depth("minimax_depth", minimax_depth)?,
            alpha_beta_depth: Self::checked_depth("alpha_beta_depth", alpha_beta_depth)?,
            state_mode,
        })
    }

    fn checked_depth(name: &'static str, depth: i64) -> Result<u32> {
        u32::try_from(depth).map_err(|_| WargameError::InvalidDepth { name, depth })
    }

    /// Depth limit configured for the given algorithm
    pub fn depth_for(&self, algorithm: Algorithm) -> u32 {
        match algorithm {
            Algorithm::Minimax => self.minimax_depth,
            Algorithm::AlphaBeta => self.alpha_beta_depth,
        }
    }
}

/// Result of one search call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub value: Evaluation,
    /// Child states produced during the search
    pub expanded_nodes: u64,
    /// Times alpha-beta stopped iterating a node's children early
    pub cutoffs: u64,
}

#[derive(Debug, Default)]
struct SearchStats {
    expanded_nodes: u64,
    cutoffs: u64,
}

/// Depth-limited minimax / alpha-beta over game states
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine {
    state_mode: StateMode,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(StateMode::Copy)
    }
}

impl SearchEngine {
    pub fn new(state_mode: StateMode) -> Self {
        SearchEngine { state_mode }
    }

    pub fn state_mode(&self) -> StateMode {
        self.state_mode
    }

    /// Values `state` for the maximizer with the root treated as a MaxNode
    pub fn search(&self, state: &GameState, roles: Roles, depth: u32, use_alpha_beta: bool) -> SearchOutcome {
        self.search_from(
            state,
            roles,
            depth,
            Algorithm::from_alpha_beta_flag(use_alpha_beta),
            NodeKind::Max,
        )
    }

    /// Values `state` for the maximizer, starting at a node of kind `root`
    pub fn search_from(
        &self,
        state: &GameState,
        roles: Roles,
        depth: u32,
        algorithm: Algorithm,
        root: NodeKind,
    ) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let value = match (self.state_mode, algorithm) {
            (StateMode::Copy, Algorithm::Minimax) => self.minimax(state, roles, depth, root, &mut stats),
            (StateMode::Copy, Algorithm::AlphaBeta) => self.alpha_beta(
                state,
                roles,
                depth,
                root,
                Evaluation::MIN,
                Evaluation::MAX,
                &mut stats,
            ),
            (StateMode::Undo, Algorithm::Minimax) => {
                let mut working = state.clone();
                self.minimax_in_place(&mut working, roles, depth, root, &mut stats)
            }
            (StateMode::Undo, Algorithm::AlphaBeta) => {
                let mut working = state.clone();
                self.alpha_beta_in_place(
                    &mut working,
                    roles,
                    depth,
                    root,
                    Evaluation::MIN,
                    Evaluation::MAX,
                    &mut stats,
                )
            }
        };

        debug!(
            "{} depth {} ({:?} root, {:?} states): value {}, expanded {}, cutoffs {}",
            algorithm.as_str(),
            depth,
            root,
            self.state_mode,
            value,
            stats.expanded_nodes,
            stats.cutoffs
        );

        SearchOutcome {
            value,
            expanded_nodes: stats.expanded_nodes,
            cutoffs: stats.cutoffs,
        }
    }

    /// Score difference from the maximizer's point of view.
    ///
    /// Exact at terminal states, an approximation at depth cutoffs.
    pub fn evaluate(state: &GameState, roles: Roles) -> Evaluation {
        state.maximizing_player(&roles).score - state.minimizing_player(&roles).score
    }

    fn is_leaf(state: &GameState, depth: u32) -> bool {
        depth == 0 || state.is_terminal()
    }

    fn minimax(&self, state: &GameState, roles: Roles, depth: u32, node: NodeKind, stats: &mut SearchStats) -> Evaluation {
        if Self::is_leaf(state, depth) {
            return Self::evaluate(state, roles);
        }

        let moves = state.legal_moves(roles.mover(node));
        let mut best = match node {
            NodeKind::Max => Evaluation::MIN,
            NodeKind::Min => Evaluation::MAX,
        };
        for m in &moves {
            let child = m.apply(state);
            stats.expanded_nodes += 1;
            let value = self.minimax(&child, roles, depth - 1, node.flip(), stats);
            best = match node {
                NodeKind::Max => max(best, value),
                NodeKind::Min => min(best, value),
            };
        }
        best
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &self,
        state: &GameState,
        roles: Roles,
        depth: u32,
        node: NodeKind,
        mut alpha: Evaluation,
        mut beta: Evaluation,
        stats: &mut SearchStats,
    ) -> Evaluation {
        if Self::is_leaf(state, depth) {
            return Self::evaluate(state, roles);
        }

        let moves = state.legal_moves(roles.mover(node));
        match node {
            NodeKind::Max => {
                let mut best = Evaluation::MIN;
                for m in &moves {
                    let child = m.apply(state);
                    stats.expanded_nodes += 1;
                    let value = self.alpha_beta(&child, roles, depth - 1, NodeKind::Min, alpha, beta, stats);
                    best = max(best, value);
                    alpha = max(alpha, best);
                    if beta <= alpha {
                        stats.cutoffs += 1;
                        break;
                    }
                }
                best
            }
            NodeKind::Min => {
                let mut best = Evaluation::MAX;
                for m in &moves {
                    let child = m.apply(state);
                    stats.expanded_nodes += 1;
                    let value = self.alpha_beta(&child, roles, depth - 1, NodeKind::Max, alpha, beta, stats);
                    best = min(best, value);
                    beta = min(beta, best);
                    if beta <= alpha {
                        stats.cutoffs += 1;
                        break;
                    }
                }
                best
            }
        }
    }

    fn minimax_in_place(
        &self,
        state: &mut GameState,
        roles: Roles,
        depth: u32,
        node: NodeKind,
        stats: &mut SearchStats,
    ) -> Evaluation {
        if Self::is_leaf(state, depth) {
            return Self::evaluate(state, roles);
        }

        let moves: Vec<Move> = state.legal_moves(roles.mover(node));
        let mut best = match node {
            NodeKind::Max => Evaluation::MIN,
            NodeKind::Min => Evaluation::MAX,
        };
        for m in &moves {
            let delta = m.apply_in_place(state);
            stats.expanded_nodes += 1;
            let value = self.minimax_in_place(state, roles, depth - 1, node.flip(), stats);
            Move::undo(state, delta);
            best = match node {
                NodeKind::Max => max(best, value),
                NodeKind::Min => min(best, value),
            };
        }
        best
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta_in_place(
        &self,
        state: &mut GameState,
        roles: Roles,
        depth: u32,
        node: NodeKind,
        mut alpha: Evaluation,
        mut beta: Evaluation,
        stats: &mut SearchStats,
    ) -> Evaluation {
        if Self::is_leaf(state, depth) {
            return Self::evaluate(state, roles);
        }

        let moves: Vec<Move> = state.legal_moves(roles.mover(node));
        let mut best = match node {
            NodeKind::Max => Evaluation::MIN,
            NodeKind::Min => Evaluation::MAX,
        };
        for m in &moves {
            let delta = m.apply_in_place(state);
            stats.expanded_nodes += 1;
            let value = self.alpha_beta_in_place(state, roles, depth - 1, node.flip(), alpha, beta, stats);
            Move::undo(state, delta);
            match node {
                NodeKind::Max => {
                    best = max(best, value);
                    alpha = max(alpha, best);
                }
                NodeKind::Min => {
                    best = min(best, value);
                    beta = min(beta, best);
                }
            }
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }
        best
    }
}
