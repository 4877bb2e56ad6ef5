//! Typed capability traits consumed by the search engine
//!
//! The search never knows the rules of the game it is searching. It only
//! talks to three narrow collaborators:
//!
//! - [`GameState`]: a snapshot that can be copied, asked for its winner and
//!   asked for its legal actions
//! - [`OutcomeModel`]: enumerates the possible results of an action together
//!   with their probabilities (dice, card draws, ...)
//! - [`RolloutPolicy`]: finishes a game from a snapshot with a fixed baseline
//!   policy and reports who won
//!
//! # Example
//!
//! ```rust
//! use engine_core::typed::{GameState, OutcomeModel};
//! use engine_core::GameError;
//!
//! /// A coin flip decides the game immediately.
//! #[derive(Debug, Clone)]
//! struct CoinFlip {
//!     winner: Option<u8>,
//! }
//!
//! impl GameState for CoinFlip {
//!     type Action = ();
//!     type Participant = u8;
//!
//!     fn winner(&self) -> Option<u8> {
//!         self.winner
//!     }
//!
//!     fn legal_actions(&self) -> Vec<()> {
//!         if self.winner.is_some() { Vec::new() } else { vec![()] }
//!     }
//! }
//!
//! struct Flip;
//!
//! impl OutcomeModel<CoinFlip> for Flip {
//!     fn outcomes(&self, _: &CoinFlip, _: &()) -> Result<Vec<(CoinFlip, f64)>, GameError> {
//!         Ok(vec![
//!             (CoinFlip { winner: Some(0) }, 0.5),
//!             (CoinFlip { winner: Some(1) }, 0.5),
//!         ])
//!     }
//! }
//!
//! let start = CoinFlip { winner: None };
//! assert!(!start.is_terminal());
//! assert_eq!(Flip.outcomes(&start, &()).unwrap().len(), 2);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use rand_chacha::ChaCha20Rng;

use crate::error::GameError;

/// A snapshot of a game.
///
/// `Clone` is the copy capability: a clone must be fully independent of the
/// original, so that simulated play on the clone never touches the live game.
pub trait GameState: Clone {
    /// Action type. Used as a map key, so equality and hashing must be stable
    /// for as long as a search tree lives.
    type Action: Clone + Eq + Hash + Debug;

    /// Identity of a participant (seat, color, player index).
    type Participant: Copy + Eq + Debug;

    /// The winning participant, if the game has ended.
    fn winner(&self) -> Option<Self::Participant>;

    /// Currently legal actions, in a stable order.
    ///
    /// Must be non-empty for any non-terminal state.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Whether the game has ended.
    #[inline]
    fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }
}

/// Transition model: every possible resulting state of an action, weighted
/// by its probability.
///
/// Deterministic actions return a single pair with probability `1.0`.
/// Probabilities of one call must sum to `1.0` within
/// [`PROBABILITY_TOLERANCE`](crate::outcome::PROBABILITY_TOLERANCE).
pub trait OutcomeModel<S: GameState> {
    fn outcomes(&self, state: &S, action: &S::Action) -> Result<Vec<(S, f64)>, GameError>;
}

/// Default rollout: plays a game from `state` to completion with a fixed
/// baseline policy and returns the winner.
///
/// # Arguments
///
/// * `state` - Snapshot to start from (never mutated)
/// * `rng` - Random number generator for stochastic elements
pub trait RolloutPolicy<S: GameState> {
    fn simulate_to_end(&self, state: &S, rng: &mut ChaCha20Rng)
        -> Result<S::Participant, GameError>;
}

impl<S: GameState, T: OutcomeModel<S> + ?Sized> OutcomeModel<S> for &T {
    fn outcomes(&self, state: &S, action: &S::Action) -> Result<Vec<(S, f64)>, GameError> {
        (**self).outcomes(state, action)
    }
}

impl<S: GameState, T: RolloutPolicy<S> + ?Sized> RolloutPolicy<S> for &T {
    fn simulate_to_end(
        &self,
        state: &S,
        rng: &mut ChaCha20Rng,
    ) -> Result<S::Participant, GameError> {
        (**self).simulate_to_end(state, rng)
    }
}
