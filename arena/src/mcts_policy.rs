//! MCTS-based policy
//!
//! Wraps a [`SearchEngine`] deciding for one seat. Rollouts play every seat
//! with uniformly random actions.

use std::time::{Duration, Instant};

use anyhow::Result;
use engine_core::RandomRollout;
use games_pig::{Pig, PigAction, PigState};
use mcts::{MctsConfig, SearchEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::policy::Policy;

/// MCTS-based policy for one seat
#[derive(Debug)]
pub struct MctsPolicy {
    engine: SearchEngine<u8, Pig, RandomRollout<Pig>>,
    /// RNG for search sampling and rollouts
    rng: ChaCha20Rng,
    /// Decisions that needed a search (more than one legal action)
    searches: u32,
    /// Time spent in those searches
    search_time: Duration,
}

impl MctsPolicy {
    /// Create a seeded policy deciding for `seat`.
    pub fn with_seed(
        seat: u8,
        pig: Pig,
        config: MctsConfig,
        max_rollout_steps: u32,
        seed: u64,
    ) -> Result<Self> {
        let rollout = RandomRollout::new(pig).with_max_steps(max_rollout_steps);
        let engine = SearchEngine::new(seat, config, pig, rollout)?;
        Ok(Self {
            engine,
            rng: ChaCha20Rng::seed_from_u64(seed),
            searches: 0,
            search_time: Duration::ZERO,
        })
    }

    /// Searches run and time spent in them since the last call
    pub fn take_search_stats(&mut self) -> (u32, Duration) {
        let stats = (self.searches, self.search_time);
        self.searches = 0;
        self.search_time = Duration::ZERO;
        stats
    }
}

impl Policy for MctsPolicy {
    fn name(&self) -> &str {
        "mcts"
    }

    fn decide(&mut self, state: &PigState, legal_actions: &[PigAction]) -> Result<PigAction> {
        let start = Instant::now();
        let action = self.engine.decide(state, legal_actions, &mut self.rng)?;

        if legal_actions.len() > 1 {
            let elapsed = start.elapsed();
            self.searches += 1;
            self.search_time += elapsed;
            debug!(
                seat = self.engine.perspective(),
                turn_total = state.turn_total(),
                ?action,
                elapsed_us = elapsed.as_micros() as u64,
                "MCTS policy decided"
            );
        }

        Ok(action)
    }
}
