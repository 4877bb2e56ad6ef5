//! MCTS tree node representation.
//!
//! Each node is bound to one game-state snapshot. Its children are grouped by
//! the action that produces them: one action may lead to several resulting
//! states, each reached with a known probability.

use std::collections::HashMap;

use engine_core::GameState;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct SearchNode<S: GameState> {
    /// Distance from the root (0 for the root)
    pub depth: u32,

    /// Participant on whose behalf rewards are counted; the same for every
    /// node of a tree
    pub perspective: S::Participant,

    /// Parent node index (NONE for root). Only used to walk upward.
    pub parent: NodeId,

    /// Game snapshot this node represents
    pub state: S,

    /// Children per action: (child, probability) pairs in outcome order.
    /// Empty until the node is expanded.
    pub children: HashMap<S::Action, Vec<(NodeId, f64)>>,

    /// Accumulated reward. Never exceeds `visits`.
    pub wins: f64,

    /// Number of selection walks that entered this node
    pub visits: u32,
}

impl<S: GameState> SearchNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S, perspective: S::Participant) -> Self {
        Self {
            depth: 0,
            perspective,
            parent: NodeId::NONE,
            state,
            children: HashMap::new(),
            wins: 0.0,
            visits: 0,
        }
    }

    /// Create a new child node one level below `parent_depth`.
    pub fn new_child(
        parent: NodeId,
        parent_depth: u32,
        perspective: S::Participant,
        state: S,
    ) -> Self {
        Self {
            depth: parent_depth + 1,
            perspective,
            parent,
            state,
            children: HashMap::new(),
            wins: 0.0,
            visits: 0,
        }
    }

    /// Check if this node has no child nodes under any action.
    ///
    /// An expanded node whose every action produced an empty outcome list is
    /// still a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.values().all(Vec::is_empty)
    }

    /// Check if this node's state reports a winner.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether expansion has run on this node.
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Outcome list for `action`, empty if the action has none.
    pub fn outcomes(&self, action: &S::Action) -> &[(NodeId, f64)] {
        self.children
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of child nodes across all actions.
    pub fn child_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }

    /// Observed reward per visit. Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// Unweighted UCT score of this node as a child.
    ///
    /// UCT = W / (N + ε) + C * sqrt(ln(N_parent + ε) / (N + ε))
    ///
    /// Takes pre-computed ln(N_parent + ε) to avoid redundant logarithms when
    /// scoring every outcome of every action.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f64, exploration_constant: f64, epsilon: f64) -> f64 {
        let visits = self.visits as f64 + epsilon;
        self.wins / visits + exploration_constant * (parent_visits_ln / visits).sqrt()
    }
}

/// ln(N + ε) of a parent's visit count, floored at 0.
///
/// An unvisited parent would give ln(ε) < 0 and a NaN exploration term.
#[inline]
pub fn visits_ln(visits: u32, epsilon: f64) -> f64 {
    (visits as f64 + epsilon).ln().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::Script;

    fn leaf_state() -> crate::test_util::ScriptState {
        Script::new()
            .node("s", None, vec![('a', vec![("s", 1.0)])])
            .state("s")
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = SearchNode::new_root(leaf_state(), 0);

        assert!(node.parent.is_none());
        assert_eq!(node.depth, 0);
        assert_eq!(node.visits, 0);
        assert_eq!(node.wins, 0.0);
        assert_eq!(node.perspective, 0);
        assert!(node.is_leaf());
        assert!(!node.is_expanded());
        assert!(!node.is_terminal());
    }

    #[test]
    fn test_new_child_depth() {
        let child = SearchNode::new_child(NodeId(3), 4, 1, leaf_state());
        assert_eq!(child.depth, 5);
        assert_eq!(child.parent, NodeId(3));
        assert_eq!(child.perspective, 1);
    }

    #[test]
    fn test_is_leaf_with_empty_outcome_lists() {
        let mut node = SearchNode::new_root(leaf_state(), 0);

        node.children.insert('a', Vec::new());
        assert!(node.is_expanded());
        assert!(node.is_leaf());

        node.children.insert('b', vec![(NodeId(1), 1.0)]);
        assert!(!node.is_leaf());
        assert_eq!(node.child_count(), 1);
        assert_eq!(node.outcomes(&'b'), &[(NodeId(1), 1.0)]);
        assert!(node.outcomes(&'z').is_empty());
    }

    #[test]
    fn test_win_rate() {
        let mut node = SearchNode::new_root(leaf_state(), 0);
        assert_eq!(node.win_rate(), 0.0);

        node.visits = 4;
        node.wins = 3.0;
        assert!((node.win_rate() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        let mut node = SearchNode::new_root(leaf_state(), 0);
        node.visits = 10;
        node.wins = 5.0;

        let c = std::f64::consts::SQRT_2;
        let eps = 1e-8;
        let ln_parent = visits_ln(100, eps);

        let expected = 5.0 / (10.0 + eps) + c * (ln_parent / (10.0 + eps)).sqrt();
        assert!((node.uct_score(ln_parent, c, eps) - expected).abs() < 1e-12);
        // ≈ 0.5 + 1.414 * sqrt(4.605 / 10) ≈ 1.4597
        assert!((node.uct_score(ln_parent, c, eps) - 1.4597).abs() < 1e-3);
    }

    #[test]
    fn test_uct_score_unvisited_is_large_and_finite() {
        let node = SearchNode::new_root(leaf_state(), 0);
        let score = node.uct_score(visits_ln(1, 1e-8), std::f64::consts::SQRT_2, 1e-8);

        assert!(score.is_finite());
        assert!(score > 1.0);
    }

    #[test]
    fn test_visits_ln_floors_unvisited_parent() {
        assert_eq!(visits_ln(0, 1e-8), 0.0);
        assert!(visits_ln(1, 1e-8) > 0.0);

        let node = SearchNode::new_root(leaf_state(), 0);
        let score = node.uct_score(visits_ln(0, 1e-8), std::f64::consts::SQRT_2, 1e-8);
        assert_eq!(score, 0.0);
    }
}
