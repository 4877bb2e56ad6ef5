//! Monte Carlo Tree Search (MCTS) for games with chance.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` collaborator traits. Actions may have
//! several possible results (dice, shuffles, ...), each with a known
//! probability.
//!
//! # Overview
//!
//! MCTS builds a search tree by running simulations. Each simulation consists
//! of four phases:
//!
//! 1. **Selection**: Descend the tree, picking at every node the action with
//!    the highest probability-weighted UCT score, then *sampling* one of that
//!    action's outcomes by its probability
//! 2. **Expansion**: When reaching a non-terminal leaf, add one child per
//!    (action, outcome) pair and take one more selection step
//! 3. **Simulation**: Play the game to completion from that node with the
//!    rollout policy
//! 4. **Backpropagation**: Add the reward (1 for a win of the searching
//!    participant, 0 otherwise) to every node from there up to the root
//!
//! Visit counts are recorded during selection only.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameState, RandomRollout};
//! use games_pig::{Pig, PigState};
//! use mcts::{MctsConfig, SearchEngine};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let pig = Pig::new(2, 20).unwrap();
//! let engine = SearchEngine::new(
//!     0u8,
//!     MctsConfig::default().with_simulations(50),
//!     pig,
//!     RandomRollout::new(pig),
//! )
//! .unwrap();
//!
//! let state = PigState::from_parts(vec![10, 12], 0, 4);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let action = engine
//!     .decide(&state, &state.legal_actions(), &mut rng)
//!     .unwrap();
//!
//! assert!(state.legal_actions().contains(&action));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: Number of simulations per decision (default: 10)
//! - `exploration_constant`: `C` of the UCT formula (default: √2)
//! - `epsilon`: Guard added to visit counts (default: 1e-8)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        SearchEngine                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │ SearchTree  │  │ OutcomeModel │  │   RolloutPolicy    │  │
//! │  │  (arena)    │  │  (chance)    │  │ (play to the end)  │  │
//! │  └──────┬──────┘  └──────┬───────┘  └─────────┬──────────┘  │
//! │         │                │                    │             │
//! │         ▼                ▼                    ▼             │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │      select → expand → simulate → backpropagate      │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export main types
pub use config::MctsConfig;
pub use node::{NodeId, SearchNode};
pub use search::{SearchEngine, SearchError, SearchResult, Simulation};
pub use tree::{ActionStats, SearchTree, TreeStats};
