// Move selection for the player about to move
//
// The engine values states; the agent turns that into a move by valuing each
// child of the real current state and keeping the best one. Ties go to the
// child found first in enumeration order.

use log::{debug, info};
use rayon::prelude::*;
use std::time::Instant;

use crate::config::{Config, StrategyConfig};
use crate::error::{Result, WargameError};
use crate::game_state::GameState;
use crate::moves::Move;
use crate::search::{Algorithm, SearchConfig, SearchEngine, SearchOutcome};
use crate::types::{Evaluation, NodeKind, Roles, Seat};

/// How root children are searched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// One child after another on the calling thread
    Sequential,
    /// Children searched concurrently on the rayon pool, each subtree
    /// sequential inside
    ParallelRoot,
}

/// The chosen move and how it was found
#[derive(Debug, Clone)]
pub struct Decision {
    pub chosen: Move,
    pub next_state: GameState,
    pub value: Evaluation,
    /// Root children plus every state expanded below them
    pub expanded_nodes: u64,
    pub cutoffs: u64,
    pub algorithm: Algorithm,
    pub depth: u32,
    pub strategy: ExecutionStrategy,
}

/// Picks moves using a search engine and fixed depth limits
#[derive(Debug, Clone)]
pub struct Agent {
    engine: SearchEngine,
    search: SearchConfig,
    strategy: StrategyConfig,
}

impl Agent {
    pub fn new(search: SearchConfig, strategy: StrategyConfig) -> Self {
        Agent {
            engine: SearchEngine::new(search.state_mode),
            search,
            strategy,
        }
    }

    /// Builds an agent from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Agent::new(config.search.to_search_config()?, config.strategy.clone()))
    }

    /// Chooses a move for `mover`, picking the execution strategy from
    /// configuration and the size of the rayon pool
    ///
    /// # Errors
    /// * `NoLegalMoves` - the state is terminal
    pub fn choose_move(&self, state: &GameState, mover: Seat, algorithm: Algorithm) -> Result<Decision> {
        let strategy = Self::determine_strategy(rayon::current_num_threads(), &self.strategy);
        self.choose_move_with(state, mover, algorithm, strategy)
    }

    /// Chooses a move for `mover` with an explicit execution strategy.
    /// Both strategies return the same move, value and node count.
    pub fn choose_move_with(
        &self,
        state: &GameState,
        mover: Seat,
        algorithm: Algorithm,
        strategy: ExecutionStrategy,
    ) -> Result<Decision> {
        let start_time = Instant::now();
        let depth = self.search.depth_for(algorithm);
        let roles = Roles::new(mover);

        let children = state.children(mover);
        if children.is_empty() {
            return Err(WargameError::NoLegalMoves);
        }

        debug!(
            "Searching {} children for {} ({}, depth {}, {:?})",
            children.len(),
            state.player(mover).id,
            algorithm.as_str(),
            depth,
            strategy
        );

        // The opponent replies next, so each child is a MinNode
        let outcomes: Vec<SearchOutcome> = match strategy {
            ExecutionStrategy::Sequential => children
                .iter()
                .map(|(_, child)| self.engine.search_from(child, roles, depth, algorithm, NodeKind::Min))
                .collect(),
            ExecutionStrategy::ParallelRoot => children
                .par_iter()
                .map(|(_, child)| self.engine.search_from(child, roles, depth, algorithm, NodeKind::Min))
                .collect(),
        };

        let best_idx = Self::first_best(&outcomes);
        let expanded_nodes = children.len() as u64 + outcomes.iter().map(|o| o.expanded_nodes).sum::<u64>();
        let cutoffs = outcomes.iter().map(|o| o.cutoffs).sum();
        let value = outcomes[best_idx].value;
        let (chosen, next_state) = children.into_iter().nth(best_idx).ok_or(WargameError::NoLegalMoves)?;

        info!(
            "{} chose {} (value: {}, expanded: {}, time: {}ms)",
            state.player(mover).id,
            chosen,
            value,
            expanded_nodes,
            start_time.elapsed().as_millis()
        );

        Ok(Decision {
            chosen,
            next_state,
            value,
            expanded_nodes,
            cutoffs,
            algorithm,
            depth,
            strategy,
        })
    }

    /// Index of the first outcome with the maximum value
    fn first_best(outcomes: &[SearchOutcome]) -> usize {
        let mut best_idx = 0;
        let mut best_value = Evaluation::MIN;
        for (idx, outcome) in outcomes.iter().enumerate() {
            if outcome.value > best_value {
                best_value = outcome.value;
                best_idx = idx;
            }
        }
        best_idx
    }

    /// Determines the execution strategy based on configuration and hardware
    fn determine_strategy(num_cpus: usize, config: &StrategyConfig) -> ExecutionStrategy {
        if config.parallel_root && num_cpus >= config.min_cpus_for_parallel {
            ExecutionStrategy::ParallelRoot
        } else {
            ExecutionStrategy::Sequential
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::StateMode;
    use crate::types::{Coord, Player};

    fn agent(depth: i64) -> Agent {
        Agent::new(
            SearchConfig::new(depth, depth, StateMode::Copy).unwrap(),
            StrategyConfig {
                parallel_root: false,
                min_cpus_for_parallel: 2,
            },
        )
    }

    fn fresh(values: Vec<Vec<u32>>) -> GameState {
        GameState::from_values(values, Player::new("p1"), Player::new("p2")).unwrap()
    }

    #[test]
    fn test_determine_strategy() {
        let parallel = StrategyConfig {
            parallel_root: true,
            min_cpus_for_parallel: 2,
        };
        assert_eq!(Agent::determine_strategy(8, &parallel), ExecutionStrategy::ParallelRoot);
        assert_eq!(Agent::determine_strategy(1, &parallel), ExecutionStrategy::Sequential);

        let disabled = StrategyConfig {
            parallel_root: false,
            min_cpus_for_parallel: 1,
        };
        assert_eq!(Agent::determine_strategy(8, &disabled), ExecutionStrategy::Sequential);
    }

    #[test]
    fn test_first_best_breaks_ties_by_enumeration_order() {
        let outcome = |value| SearchOutcome {
            value,
            expanded_nodes: 0,
            cutoffs: 0,
        };
        let outcomes = vec![outcome(1), outcome(4), outcome(2), outcome(4)];
        assert_eq!(Agent::first_best(&outcomes), 1);
    }

    #[test]
    fn test_takes_the_bigger_cell() {
        let state = fresh(vec![vec![5, 3]]);
        for &algorithm in &[Algorithm::Minimax, Algorithm::AlphaBeta] {
            let decision = agent(2).choose_move(&state, Seat::First, algorithm).unwrap();
            assert_eq!(decision.chosen.target(), Coord::new(0, 0));
            assert_eq!(decision.value, 2);
            assert_eq!(decision.next_state.player(Seat::First).score, 5);
        }
    }

    #[test]
    fn test_terminal_state_has_no_decision() {
        let state = fresh(vec![vec![1]]).apply_move(&Move::ParaDrop {
            player: Seat::First,
            target: Coord::new(0, 0),
        });
        let result = agent(1).choose_move(&state, Seat::Second, Algorithm::AlphaBeta);
        assert!(matches!(result, Err(WargameError::NoLegalMoves)));
    }

    #[test]
    fn test_ties_pick_first_enumerated_child() {
        // Every cell is worth the same, so the first ParaDrop wins
        let state = fresh(vec![vec![1, 1], vec![1, 1]]);
        let decision = agent(1).choose_move(&state, Seat::First, Algorithm::Minimax).unwrap();
        assert_eq!(
            decision.chosen,
            Move::ParaDrop {
                player: Seat::First,
                target: Coord::new(0, 0)
            }
        );
    }
}
