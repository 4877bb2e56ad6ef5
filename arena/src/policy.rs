//! Action selection policies for the arena

use anyhow::{anyhow, Result};
use games_pig::{PigAction, PigState};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

/// A seat at the table: picks one of the legal actions for the state.
pub trait Policy {
    /// Short label for logs
    fn name(&self) -> &str;

    /// Select an action among `legal_actions`
    fn decide(&mut self, state: &PigState, legal_actions: &[PigAction]) -> Result<PigAction>;
}

/// Random policy that selects actions uniformly at random.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, _state: &PigState, legal_actions: &[PigAction]) -> Result<PigAction> {
        legal_actions
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("No legal actions to choose from"))
    }
}
