//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm over stochastic transitions:
//! 1. Selection: descend by probability-weighted UCT, sampling one outcome
//!    of the chosen action at every level
//! 2. Expansion: add one child per (action, outcome) pair of the leaf, then
//!    take one more selection step into the new children
//! 3. Simulation: finish the game from that node with the rollout policy
//! 4. Backpropagation: add the reward to the evaluated node and its ancestors

use std::fmt::Debug;
use std::time::{Duration, Instant};

use engine_core::{GameError, GameState, OutcomeModel, RolloutPolicy};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::tree::{ActionStats, SearchTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal actions available")]
    NoLegalActions,

    #[error("Invalid MCTS config: {0}")]
    InvalidConfig(String),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Non-terminal node produced no outcomes to select")]
    EmptyExpansion,
}

/// What a single simulation evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation<P> {
    /// Node whose result was backpropagated
    pub evaluated: NodeId,

    /// Winner reported by the terminal state or the rollout
    pub winner: P,

    /// 1.0 if `winner` is the tree's perspective, else 0.0
    pub reward: f64,

    /// True if the evaluated node was already terminal (no rollout ran)
    pub terminal: bool,
}

impl<S: GameState> SearchTree<S> {
    /// Run a single simulation (select -> expand -> simulate -> backpropagate)
    /// starting at `start`.
    ///
    /// Backpropagation always runs up to the tree root, so `start` is the
    /// root in every regular search.
    pub fn run_simulation<M, R>(
        &mut self,
        start: NodeId,
        model: &M,
        rollout: &R,
        config: &MctsConfig,
        rng: &mut ChaCha20Rng,
    ) -> Result<Simulation<S::Participant>, SearchError>
    where
        M: OutcomeModel<S> + ?Sized,
        R: RolloutPolicy<S> + ?Sized,
    {
        let c = config.exploration_constant;
        let eps = config.epsilon;

        // Selection: every node entered on the way down counts a visit
        let mut current = start;
        self.get_mut(current).visits += 1;
        while !self.get(current).is_leaf() {
            current = self
                .select_child(current, c, eps, rng)
                .ok_or(SearchError::EmptyExpansion)?;
            self.get_mut(current).visits += 1;
        }

        let (winner, terminal) = match self.get(current).state.winner() {
            Some(winner) => (winner, true),
            None => {
                // Expansion, then one more selection step into the new children
                self.expand(current, model)?;
                current = self
                    .select_child(current, c, eps, rng)
                    .ok_or(SearchError::EmptyExpansion)?;
                self.get_mut(current).visits += 1;

                // Simulation
                (rollout.simulate_to_end(&self.get(current).state, rng)?, false)
            }
        };

        let node = self.get(current);
        let reward = if winner == node.perspective { 1.0 } else { 0.0 };

        trace!(
            node = current.0,
            depth = node.depth,
            terminal,
            winner = ?winner,
            reward,
            "MCTS simulation complete"
        );

        self.backpropagate(current, reward);

        Ok(Simulation {
            evaluated: current,
            winner,
            reward,
            terminal,
        })
    }
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best action to take, always one of the legal actions passed in
    pub action: A,

    /// Per-action statistics at the root, in legal-action order
    pub actions: Vec<ActionStats<A>>,

    /// Shape of the tree the decision was made on
    pub stats: TreeStats,

    /// Number of simulations performed
    pub simulations: u32,

    /// Wall-clock time spent building the tree and scoring the root
    pub elapsed: Duration,
}

/// Decision entry point: builds a fresh tree per decision and returns the
/// best action found for `perspective`.
#[derive(Debug, Clone)]
pub struct SearchEngine<P, M, R> {
    perspective: P,
    config: MctsConfig,
    model: M,
    rollout: R,
}

impl<P, M, R> SearchEngine<P, M, R>
where
    P: Copy + Eq + Debug,
{
    /// Create an engine deciding on behalf of `perspective`.
    pub fn new(
        perspective: P,
        config: MctsConfig,
        model: M,
        rollout: R,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            perspective,
            config,
            model,
            rollout,
        })
    }

    pub fn perspective(&self) -> P {
        self.perspective
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn rollout(&self) -> &R {
        &self.rollout
    }

    /// Pick an action among `legal_actions`.
    ///
    /// With a single legal action it is returned immediately: no tree is
    /// built and neither collaborator is called.
    pub fn decide<S>(
        &self,
        state: &S,
        legal_actions: &[S::Action],
        rng: &mut ChaCha20Rng,
    ) -> Result<S::Action, SearchError>
    where
        S: GameState<Participant = P>,
        M: OutcomeModel<S>,
        R: RolloutPolicy<S>,
    {
        match legal_actions {
            [] => Err(SearchError::NoLegalActions),
            [only] => {
                debug!(action = ?only, "Single legal action, skipping search");
                Ok(only.clone())
            }
            _ => Ok(self.search(state, legal_actions, rng)?.action),
        }
    }

    /// Run the full search and report the statistics behind the decision.
    pub fn search<S>(
        &self,
        state: &S,
        legal_actions: &[S::Action],
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<S::Action>, SearchError>
    where
        S: GameState<Participant = P>,
        M: OutcomeModel<S>,
        R: RolloutPolicy<S>,
    {
        if legal_actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let start = Instant::now();
        let tree = self.build_tree(state, rng)?;

        let c = self.config.exploration_constant;
        let eps = self.config.epsilon;
        let root = tree.root();
        let action = tree
            .best_action_among(root, legal_actions, c, eps)
            .ok_or(SearchError::NoLegalActions)?;
        let actions = tree.action_stats(root, legal_actions, c, eps);
        let stats = tree.stats();
        let elapsed = start.elapsed();

        debug!(
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            legal_actions = legal_actions.len(),
            simulations = self.config.num_simulations,
            tree_nodes = stats.total_nodes,
            action = ?action,
            "MCTS decision"
        );

        Ok(SearchResult {
            action,
            actions,
            stats,
            simulations: self.config.num_simulations,
            elapsed,
        })
    }

    /// Build a tree from a copy of `state` and run the configured number of
    /// simulations on its root.
    pub fn build_tree<S>(
        &self,
        state: &S,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchTree<S>, SearchError>
    where
        S: GameState<Participant = P>,
        M: OutcomeModel<S>,
        R: RolloutPolicy<S>,
    {
        let mut tree = SearchTree::new(state.clone(), self.perspective);
        let root = tree.root();

        for _ in 0..self.config.num_simulations {
            tree.run_simulation(root, &self.model, &self.rollout, &self.config, rng)?;
        }

        Ok(tree)
    }
}
