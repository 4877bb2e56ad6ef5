//! Core traits and types for the Gambit game engine
//!
//! This crate provides the collaborator abstractions a decision engine
//! consumes without knowing the rules of the game:
//! - `GameState`: snapshot capabilities (copy, winner, legal actions)
//! - `OutcomeModel`: probability-weighted results of an action
//! - `RolloutPolicy`: play a snapshot to the end with a baseline policy
//! - `RandomRollout`: the uniformly random baseline rollout

pub mod error;
pub mod outcome;
pub mod rollout;
pub mod typed;

// Re-export main types for convenience
pub use error::GameError;
pub use outcome::{
    probability_mass, sample_outcome, sample_weighted, validate_distribution,
    PROBABILITY_TOLERANCE,
};
pub use rollout::{advance, RandomRollout, DEFAULT_MAX_ROLLOUT_STEPS};
pub use typed::{GameState, OutcomeModel, RolloutPolicy};
