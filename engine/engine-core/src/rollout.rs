//! Random playout rollout.
//!
//! The baseline policy every participant follows during a rollout: pick a
//! uniformly random legal action, let chance pick one of its outcomes, and
//! repeat until somebody wins.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::error::GameError;
use crate::outcome::sample_outcome;
use crate::typed::{GameState, OutcomeModel, RolloutPolicy};

/// Default cap on actions played by a single rollout.
pub const DEFAULT_MAX_ROLLOUT_STEPS: u32 = 10_000;

/// Apply `action` to `state` by sampling one of its outcomes.
pub fn advance<S, M>(
    model: &M,
    state: &S,
    action: &S::Action,
    rng: &mut ChaCha20Rng,
) -> Result<S, GameError>
where
    S: GameState,
    M: OutcomeModel<S> + ?Sized,
{
    let mut outcomes = model.outcomes(state, action)?;
    let idx = sample_outcome(&outcomes, rng)
        .ok_or_else(|| GameError::EmptyDistribution(format!("{action:?}")))?;
    Ok(outcomes.swap_remove(idx).0)
}

/// Rollout where every participant plays uniformly random legal actions.
#[derive(Debug, Clone)]
pub struct RandomRollout<M> {
    model: M,
    /// Maximum number of actions before the rollout is abandoned
    pub max_steps: u32,
}

impl<M> RandomRollout<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            max_steps: DEFAULT_MAX_ROLLOUT_STEPS,
        }
    }

    /// Builder pattern: set the step cap.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The transition model used to play actions.
    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<S, M> RolloutPolicy<S> for RandomRollout<M>
where
    S: GameState,
    M: OutcomeModel<S>,
{
    fn simulate_to_end(
        &self,
        state: &S,
        rng: &mut ChaCha20Rng,
    ) -> Result<S::Participant, GameError> {
        let mut current = state.clone();

        for step in 0..self.max_steps {
            if let Some(winner) = current.winner() {
                trace!(steps = step, ?winner, "Rollout finished");
                return Ok(winner);
            }

            let actions = current.legal_actions();
            if actions.is_empty() {
                return Err(GameError::NoLegalActions);
            }
            let action = &actions[rng.gen_range(0..actions.len())];
            current = advance(&self.model, &current, action, rng)?;
        }

        current.winner().ok_or(GameError::RolloutLimit {
            steps: self.max_steps,
        })
    }
}
