//! Errors raised by game collaborators.

use thiserror::Error;

/// Errors that a state, outcome model or rollout policy may report.
///
/// The search never swallows these: they abort the decision in progress.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Outcome probabilities sum to {total}, expected 1.0")]
    InvalidDistribution { total: f64 },

    #[error("Invalid outcome probability {probability}")]
    InvalidProbability { probability: f64 },

    #[error("Action has no outcomes: {0}")]
    EmptyDistribution(String),

    #[error("Rollout did not finish within {steps} steps")]
    RolloutLimit { steps: u32 },

    #[error("Non-terminal state has no legal actions")]
    NoLegalActions,

    #[error("{0}")]
    Other(String),
}
