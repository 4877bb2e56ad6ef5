//! Scripted toy game for unit tests.
//!
//! States are labels. A [`Script`] maps each label to its winner and, per
//! action, the labels it can lead to with their probabilities. Labels may
//! repeat along a path: every visit still creates a fresh tree node.

use std::cell::Cell;
use std::collections::HashMap;

use engine_core::{GameError, GameState, OutcomeModel, RolloutPolicy};
use rand_chacha::ChaCha20Rng;

type Edges = Vec<(char, Vec<(&'static str, f64)>)>;

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptState {
    pub label: &'static str,
    winner: Option<u8>,
    actions: Vec<char>,
}

impl GameState for ScriptState {
    type Action = char;
    type Participant = u8;

    fn winner(&self) -> Option<u8> {
        self.winner
    }

    fn legal_actions(&self) -> Vec<char> {
        self.actions.clone()
    }
}

#[derive(Debug, Clone)]
struct ScriptNode {
    winner: Option<u8>,
    edges: Edges,
}

#[derive(Debug, Default)]
pub struct Script {
    nodes: HashMap<&'static str, ScriptNode>,
    calls: Cell<u32>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, label: &'static str, winner: Option<u8>, edges: Edges) -> Self {
        self.nodes.insert(label, ScriptNode { winner, edges });
        self
    }

    pub fn terminal(self, label: &'static str, winner: u8) -> Self {
        self.node(label, Some(winner), Vec::new())
    }

    pub fn state(&self, label: &'static str) -> ScriptState {
        let node = &self.nodes[label];
        ScriptState {
            label,
            winner: node.winner,
            actions: node.edges.iter().map(|(action, _)| *action).collect(),
        }
    }

    /// Number of `outcomes` queries answered so far.
    pub fn outcome_calls(&self) -> u32 {
        self.calls.get()
    }
}

impl OutcomeModel<ScriptState> for Script {
    fn outcomes(
        &self,
        state: &ScriptState,
        action: &char,
    ) -> Result<Vec<(ScriptState, f64)>, GameError> {
        self.calls.set(self.calls.get() + 1);

        let node = self
            .nodes
            .get(state.label)
            .ok_or_else(|| GameError::Other(format!("unknown state {}", state.label)))?;
        let (_, targets) = node
            .edges
            .iter()
            .find(|(a, _)| a == action)
            .ok_or_else(|| GameError::IllegalAction(format!("{action:?}")))?;

        Ok(targets
            .iter()
            .map(|&(label, p)| (self.state(label), p))
            .collect())
    }
}

/// Rollout that always reports the same winner.
#[derive(Debug)]
pub struct FixedRollout {
    winner: u8,
    calls: Cell<u32>,
}

impl FixedRollout {
    pub fn new(winner: u8) -> Self {
        Self {
            winner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl RolloutPolicy<ScriptState> for FixedRollout {
    fn simulate_to_end(&self, state: &ScriptState, _: &mut ChaCha20Rng) -> Result<u8, GameError> {
        self.calls.set(self.calls.get() + 1);
        Ok(state.winner.unwrap_or(self.winner))
    }
}

/// Rollout that always fails.
#[derive(Debug)]
pub struct FailingRollout;

impl RolloutPolicy<ScriptState> for FailingRollout {
    fn simulate_to_end(&self, _: &ScriptState, _: &mut ChaCha20Rng) -> Result<u8, GameError> {
        Err(GameError::Other("rollout exploded".into()))
    }
}

/// Two actions: `A` wins for participant 0, `B` wins for participant 1.
pub fn win_or_lose() -> Script {
    Script::new()
        .node(
            "root",
            None,
            vec![('A', vec![("win", 1.0)]), ('B', vec![("lose", 1.0)])],
        )
        .terminal("win", 0)
        .terminal("lose", 1)
}

/// One action with two chance outcomes of probability 0.8 and 0.2. Both
/// outcomes can be expanded indefinitely.
pub fn biased_coin() -> Script {
    Script::new()
        .node("root", None, vec![('x', vec![("heads", 0.8), ("tails", 0.2)])])
        .node("heads", None, vec![('y', vec![("heads", 1.0)])])
        .node("tails", None, vec![('y', vec![("tails", 1.0)])])
}
