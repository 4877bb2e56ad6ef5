//! Game driver: seats policies around a Pig table and plays one game.

use anyhow::{anyhow, bail, Result};
use engine_core::{advance, GameState};
use games_pig::{Pig, PigState};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::policy::Policy;

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub winner: u8,
    /// Actions played by all seats
    pub actions: u32,
    pub final_scores: Vec<u32>,
}

/// Play one game to the end.
///
/// `seats[i]` decides for seat `i`. Dice are rolled with `rng`. A game that
/// has not finished after `max_actions` actions is abandoned with an error.
pub fn play_game(
    pig: &Pig,
    seats: &mut [&mut dyn Policy],
    rng: &mut ChaCha20Rng,
    max_actions: u32,
) -> Result<GameRecord> {
    if seats.len() != pig.players() as usize {
        bail!(
            "{} policies for a table of {} players",
            seats.len(),
            pig.players()
        );
    }

    let mut state: PigState = pig.initial_state();
    let mut actions = 0u32;

    loop {
        if let Some(winner) = state.winner() {
            return Ok(GameRecord {
                winner,
                actions,
                final_scores: state.scores().to_vec(),
            });
        }

        if actions >= max_actions {
            bail!("Game did not finish within {max_actions} actions");
        }

        let seat = state.current_player();
        let legal = state.legal_actions();
        let policy = &mut seats[seat as usize];
        let action = policy.decide(&state, &legal)?;

        if !legal.contains(&action) {
            return Err(anyhow!(
                "{} policy at seat {seat} chose illegal {action:?}",
                policy.name()
            ));
        }

        trace!(seat, policy = policy.name(), ?action, "Action played");
        state = advance(pig, &state, &action, rng)?;
        actions += 1;
    }
}
