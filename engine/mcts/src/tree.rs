//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec and
//! referenced by NodeId indices. The arena owns every node; a node's
//! `parent` is only an index, so there are no ownership cycles.

use engine_core::{sample_weighted, validate_distribution, GameError, GameState, OutcomeModel};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::node::{visits_ln, NodeId, SearchNode};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: GameState> SearchTree<S> {
    /// Create a new tree whose root holds `root_state`.
    ///
    /// The caller passes an owned snapshot; simulated play only ever touches
    /// snapshots owned by the tree.
    pub fn new(root_state: S, perspective: S::Participant) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state, perspective)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: SearchNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[SearchNode<S>] {
        &self.nodes
    }

    /// Expand a node: one child per (action, outcome) pair of its state.
    ///
    /// Every legal action gets an entry, even when the outcome model returns
    /// no outcomes for it. Returns the number of children created. A node
    /// that was already expanded is left untouched.
    pub fn expand<M>(&mut self, node_id: NodeId, model: &M) -> Result<usize, GameError>
    where
        M: OutcomeModel<S> + ?Sized,
    {
        let node = self.get(node_id);
        if node.is_expanded() {
            return Ok(0);
        }

        let depth = node.depth;
        let perspective = node.perspective;

        // Query every action before touching the arena so a failing model
        // leaves the tree unchanged.
        let mut expansions = Vec::new();
        for action in node.state.legal_actions() {
            let outcomes = model.outcomes(&node.state, &action)?;
            validate_distribution(&outcomes)?;
            expansions.push((action, outcomes));
        }

        let mut created = 0;
        for (action, outcomes) in expansions {
            let mut children = Vec::with_capacity(outcomes.len());
            for (state, probability) in outcomes {
                let child = SearchNode::new_child(node_id, depth, perspective, state);
                children.push((self.allocate(child), probability));
            }
            created += children.len();
            self.get_mut(node_id).children.insert(action, children);
        }

        trace!(node = node_id.0, depth, children = created, "Expanded node");
        Ok(created)
    }

    /// Probability-weighted UCT score of one action:
    ///
    /// Σ p · ( W / (N + ε) + C · sqrt( ln(N_parent + ε) / (N + ε) ) )
    ///
    /// over the action's (child, p) outcomes. An action without outcomes
    /// scores 0.
    pub fn action_children_expected_score(
        &self,
        node_id: NodeId,
        action: &S::Action,
        exploration_constant: f64,
        epsilon: f64,
    ) -> f64 {
        let node = self.get(node_id);
        let parent_visits_ln = visits_ln(node.visits, epsilon);

        node.outcomes(action)
            .iter()
            .fold(0.0, |score, &(child_id, probability)| {
                let child = self.get(child_id);
                let uct = child.uct_score(parent_visits_ln, exploration_constant, epsilon);
                score + probability * uct
            })
    }

    /// The highest-scoring action among `actions`. The first of equally
    /// scored actions wins. Returns None if `actions` is empty.
    pub fn best_action_among(
        &self,
        node_id: NodeId,
        actions: &[S::Action],
        exploration_constant: f64,
        epsilon: f64,
    ) -> Option<S::Action> {
        self.argmax(node_id, actions.iter(), exploration_constant, epsilon)
            .cloned()
    }

    /// The highest-scoring currently legal action of a node's state.
    pub fn choose_best_action(
        &self,
        node_id: NodeId,
        exploration_constant: f64,
        epsilon: f64,
    ) -> Option<S::Action> {
        let actions = self.get(node_id).state.legal_actions();
        self.best_action_among(node_id, &actions, exploration_constant, epsilon)
    }

    /// One selection step: take the best action among those with outcomes,
    /// then draw one of its children using the outcome probabilities as
    /// sampling weights.
    ///
    /// Returns None if no legal action of the node has any outcome.
    pub fn select_child(
        &self,
        node_id: NodeId,
        exploration_constant: f64,
        epsilon: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        let actions = node.state.legal_actions();
        let candidates = actions
            .iter()
            .filter(|action| !node.outcomes(action).is_empty());

        let action = self.argmax(node_id, candidates, exploration_constant, epsilon)?;
        let outcomes = node.outcomes(action);
        let idx = sample_weighted(outcomes.iter().map(|&(_, p)| p), rng)?;

        Some(outcomes[idx].0)
    }

    fn argmax<'a, I>(
        &self,
        node_id: NodeId,
        actions: I,
        exploration_constant: f64,
        epsilon: f64,
    ) -> Option<&'a S::Action>
    where
        I: IntoIterator<Item = &'a S::Action>,
        S::Action: 'a,
    {
        let mut best: Option<(&S::Action, f64)> = None;
        for action in actions {
            let score =
                self.action_children_expected_score(node_id, action, exploration_constant, epsilon);
            match best {
                Some((_, best_score)) if score > best_score => best = Some((action, score)),
                Some(_) => {}
                None => best = Some((action, score)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Add `reward` to a node and every ancestor up to and including the
    /// root. Visit counts are not touched: the selection walk already
    /// counted them.
    pub fn backpropagate(&mut self, node_id: NodeId, reward: f64) {
        let mut current_id = node_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.wins += reward;
            current_id = node.parent;
        }
    }

    /// Per-action statistics of a node, in the order of `actions`.
    pub fn action_stats(
        &self,
        node_id: NodeId,
        actions: &[S::Action],
        exploration_constant: f64,
        epsilon: f64,
    ) -> Vec<ActionStats<S::Action>> {
        let node = self.get(node_id);

        actions
            .iter()
            .map(|action| {
                let outcomes = node.outcomes(action);
                let (visits, wins) = outcomes.iter().fold((0, 0.0), |(v, w), &(id, _)| {
                    let child = self.get(id);
                    (v + child.visits, w + child.wins)
                });
                ActionStats {
                    action: action.clone(),
                    score: self.action_children_expected_score(
                        node_id,
                        action,
                        exploration_constant,
                        epsilon,
                    ),
                    visits,
                    wins,
                    outcomes: outcomes.len(),
                }
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_wins: root.wins,
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
        }
    }
}

/// Search statistics for one action of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionStats<A> {
    pub action: A,
    /// Probability-weighted UCT score at the end of the search
    pub score: f64,
    /// Sum of visits over the action's children
    pub visits: u32,
    /// Sum of wins over the action's children
    pub wins: f64,
    /// Number of distinct outcomes
    pub outcomes: usize,
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_wins: f64,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{biased_coin, win_or_lose, Script};
    use rand::SeedableRng;
    use std::f64::consts::SQRT_2;

    const EPS: f64 = 1e-8;

    #[test]
    fn test_new_tree() {
        let script = win_or_lose();
        let tree = SearchTree::new(script.state("root"), 0);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.state.label, "root");
        assert!(root.is_leaf());
    }

    #[test]
    fn test_expand_creates_one_child_per_outcome() {
        let script = biased_coin();
        let mut tree = SearchTree::new(script.state("root"), 0);

        let created = tree.expand(tree.root(), &script).unwrap();
        assert_eq!(created, 2);
        assert_eq!(tree.len(), 3);

        let root = tree.get(tree.root());
        let outcomes = root.outcomes(&'x');
        assert_eq!(outcomes.len(), 2);
        assert_eq!(tree.get(outcomes[0].0).state.label, "heads");
        assert_eq!(tree.get(outcomes[1].0).state.label, "tails");
        assert!((outcomes[0].1 - 0.8).abs() < 1e-12);

        for &(child_id, _) in outcomes {
            let child = tree.get(child_id);
            assert_eq!(child.parent, tree.root());
            assert_eq!(child.depth, 1);
            assert_eq!(child.perspective, 0);
        }
    }

    #[test]
    fn test_expand_is_not_repeated() {
        let script = biased_coin();
        let mut tree = SearchTree::new(script.state("root"), 0);

        tree.expand(tree.root(), &script).unwrap();
        assert_eq!(tree.expand(tree.root(), &script).unwrap(), 0);
        assert_eq!(tree.len(), 3);
        assert_eq!(script.outcome_calls(), 1);
    }

    #[test]
    fn test_expand_keeps_empty_outcome_lists() {
        let script = Script::new()
            .node("root", None, vec![('a', vec![]), ('b', vec![("end", 1.0)])])
            .terminal("end", 0);
        let mut tree = SearchTree::new(script.state("root"), 0);

        tree.expand(tree.root(), &script).unwrap();
        let root = tree.get(tree.root());
        assert!(root.children.contains_key(&'a'));
        assert!(root.outcomes(&'a').is_empty());
        assert_eq!(
            tree.action_children_expected_score(tree.root(), &'a', SQRT_2, EPS),
            0.0
        );
    }

    #[test]
    fn test_expand_rejects_bad_distribution() {
        let script = Script::new()
            .node("root", None, vec![('a', vec![("end", 0.5)])])
            .terminal("end", 0);
        let mut tree = SearchTree::new(script.state("root"), 0);

        let err = tree.expand(tree.root(), &script).unwrap_err();
        assert!(matches!(err, GameError::InvalidDistribution { .. }));
        assert_eq!(tree.len(), 1);
        assert!(!tree.get(tree.root()).is_expanded());
    }

    #[test]
    fn test_single_outcome_score_is_plain_uct() {
        let script = win_or_lose();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();

        tree.get_mut(tree.root()).visits = 12;
        let child_id = tree.get(tree.root()).outcomes(&'A')[0].0;
        tree.get_mut(child_id).visits = 5;
        tree.get_mut(child_id).wins = 3.0;

        let expected = 3.0 / (5.0 + EPS) + SQRT_2 * ((12.0 + EPS).ln() / (5.0 + EPS)).sqrt();
        let score = tree.action_children_expected_score(tree.root(), &'A', SQRT_2, EPS);
        assert_eq!(score, expected);
    }

    #[test]
    fn test_weighted_score() {
        let script = biased_coin();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();
        tree.get_mut(tree.root()).visits = 10;

        let outcomes = tree.get(tree.root()).outcomes(&'x').to_vec();
        tree.get_mut(outcomes[0].0).visits = 8;
        tree.get_mut(outcomes[0].0).wins = 6.0;
        tree.get_mut(outcomes[1].0).visits = 2;
        tree.get_mut(outcomes[1].0).wins = 0.0;

        let ln_parent = (10.0 + EPS).ln();
        let uct = |w: f64, n: f64| w / (n + EPS) + SQRT_2 * (ln_parent / (n + EPS)).sqrt();
        let expected = 0.8 * uct(6.0, 8.0) + 0.2 * uct(0.0, 2.0);

        let score = tree.action_children_expected_score(tree.root(), &'x', SQRT_2, EPS);
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_best_action_ties_go_to_first() {
        let script = win_or_lose();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();

        // Both children unvisited: identical scores
        assert_eq!(tree.choose_best_action(tree.root(), SQRT_2, EPS), Some('A'));
        assert_eq!(
            tree.best_action_among(tree.root(), &['B', 'A'], SQRT_2, EPS),
            Some('B')
        );
        assert_eq!(tree.best_action_among(tree.root(), &[], SQRT_2, EPS), None);
    }

    #[test]
    fn test_unvisited_parent_scores_are_finite() {
        let script = win_or_lose();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();
        assert_eq!(tree.get(tree.root()).visits, 0);

        for action in ['A', 'B'] {
            let score = tree.action_children_expected_score(tree.root(), &action, SQRT_2, EPS);
            assert!(score.is_finite(), "score of {action} is {score}");
        }
        assert_eq!(tree.choose_best_action(tree.root(), SQRT_2, EPS), Some('A'));

        // A visited child still scores by its win rate alone
        let a = tree.get(tree.root()).outcomes(&'A')[0].0;
        tree.get_mut(a).visits = 1;
        tree.get_mut(a).wins = 1.0;
        let score = tree.action_children_expected_score(tree.root(), &'A', SQRT_2, EPS);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_best_action_prefers_higher_win_rate() {
        let script = win_or_lose();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();
        tree.get_mut(tree.root()).visits = 4;

        let a = tree.get(tree.root()).outcomes(&'A')[0].0;
        let b = tree.get(tree.root()).outcomes(&'B')[0].0;
        tree.get_mut(a).visits = 2;
        tree.get_mut(a).wins = 2.0;
        tree.get_mut(b).visits = 2;

        assert_eq!(tree.choose_best_action(tree.root(), SQRT_2, EPS), Some('A'));
    }

    #[test]
    fn test_select_child_skips_actions_without_outcomes() {
        let script = Script::new()
            .node("root", None, vec![('a', vec![]), ('b', vec![("end", 1.0)])])
            .terminal("end", 0);
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();

        let mut rng = ChaCha20Rng::seed_from_u64(42);
        // With C = 0 both actions score 0 and 'a' would win the tie
        let child = tree.select_child(tree.root(), 0.0, EPS, &mut rng).unwrap();
        assert_eq!(tree.get(child).state.label, "end");
    }

    #[test]
    fn test_select_child_samples_by_probability() {
        let script = biased_coin();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();
        tree.get_mut(tree.root()).visits = 1;

        let heads = tree.get(tree.root()).outcomes(&'x')[0].0;
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let trials = 10_000;
        let hits = (0..trials)
            .filter(|_| tree.select_child(tree.root(), SQRT_2, EPS, &mut rng) == Some(heads))
            .count();

        let ratio = hits as f64 / trials as f64;
        assert!((ratio - 0.8).abs() < 0.03, "ratio was {ratio}");
    }

    #[test]
    fn test_backpropagate_adds_wins_only() {
        let script = biased_coin();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();

        let heads = tree.get(tree.root()).outcomes(&'x')[0].0;
        tree.expand(heads, &script).unwrap();
        let grandchild = tree.get(heads).outcomes(&'y')[0].0;

        tree.backpropagate(grandchild, 1.0);

        assert_eq!(tree.get(grandchild).wins, 1.0);
        assert_eq!(tree.get(heads).wins, 1.0);
        assert_eq!(tree.get(tree.root()).wins, 1.0);

        // The sibling branch is untouched
        let tails = tree.get(tree.root()).outcomes(&'x')[1].0;
        assert_eq!(tree.get(tails).wins, 0.0);

        for node in tree.arena() {
            assert_eq!(node.visits, 0);
        }
    }

    #[test]
    fn test_action_stats() {
        let script = biased_coin();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();

        let outcomes = tree.get(tree.root()).outcomes(&'x').to_vec();
        tree.get_mut(outcomes[0].0).visits = 3;
        tree.get_mut(outcomes[0].0).wins = 2.0;
        tree.get_mut(outcomes[1].0).visits = 1;

        let stats = tree.action_stats(tree.root(), &['x'], SQRT_2, EPS);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].action, 'x');
        assert_eq!(stats[0].visits, 4);
        assert_eq!(stats[0].wins, 2.0);
        assert_eq!(stats[0].outcomes, 2);
    }

    #[test]
    fn test_tree_stats() {
        let script = biased_coin();
        let mut tree = SearchTree::new(script.state("root"), 0);
        tree.expand(tree.root(), &script).unwrap();
        let heads = tree.get(tree.root()).outcomes(&'x')[0].0;
        tree.expand(heads, &script).unwrap();

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.root_visits, 0);
    }
}
