//! Arena loop: seats one MCTS player among random players and plays a batch
//! of Pig games.

use anyhow::Result;
use games_pig::Pig;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{error, info};

use crate::config::Config;
use crate::game::play_game;
use crate::mcts_policy::MctsPolicy;
use crate::policy::{Policy, RandomPolicy};
use crate::stats::{ArenaStats, ArenaStatsSnapshot};

pub struct Arena {
    config: Config,
    pig: Pig,
    mcts: MctsPolicy,
    /// Random players for every seat except `config.mcts_seat`, in seat order
    opponents: Vec<RandomPolicy>,
    /// Dice for the arena games
    dice: ChaCha20Rng,
    stats: ArenaStats,
}

impl Arena {
    /// Build the table from `config`, validating it first.
    ///
    /// Seeds derive from `config.seed`: dice use it as is, the MCTS player
    /// uses `seed + 1` and the random player at seat `s` uses `seed + 2 + s`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let pig = Pig::new(config.players, config.target_score)?;
        let mcts = MctsPolicy::with_seed(
            config.mcts_seat,
            pig,
            config.mcts_config(),
            config.max_rollout_steps,
            config.seed.wrapping_add(1),
        )?;

        let opponents = (0..config.players)
            .filter(|&seat| seat != config.mcts_seat)
            .map(|seat| RandomPolicy::with_seed(config.seed.wrapping_add(2 + seat as u64)))
            .collect();

        let stats = ArenaStats::new(config.stats_path(), config.players, config.mcts_seat);

        info!(
            players = config.players,
            target_score = config.target_score,
            mcts_seat = config.mcts_seat,
            num_simulations = config.num_simulations,
            "Arena initialized"
        );

        Ok(Self {
            dice: ChaCha20Rng::seed_from_u64(config.seed),
            config,
            pig,
            mcts,
            opponents,
            stats,
        })
    }

    /// Play `config.games` games and return the final stats.
    ///
    /// A game that fails is logged and counted, and the batch continues.
    pub fn run(&mut self) -> ArenaStatsSnapshot {
        info!(games = self.config.games, "Arena starting");

        for game in 1..=self.config.games {
            let mut seats: Vec<&mut dyn Policy> = self
                .opponents
                .iter_mut()
                .map(|p| p as &mut dyn Policy)
                .collect();
            seats.insert(self.config.mcts_seat as usize, &mut self.mcts);

            let result = play_game(
                &self.pig,
                &mut seats,
                &mut self.dice,
                self.config.max_rollout_steps,
            );

            let (searches, search_time) = self.mcts.take_search_stats();
            self.stats.record_mcts_stats(searches, search_time);

            match result {
                Ok(record) => {
                    info!(
                        game,
                        winner = record.winner,
                        actions = record.actions,
                        scores = ?record.final_scores,
                        "Game finished"
                    );
                    self.stats.record_game(&record);
                }
                Err(e) => {
                    error!("Game {} failed: {}", game, e);
                    self.stats.record_failure();
                }
            }

            if self.config.log_interval > 0 && game % self.config.log_interval == 0 {
                self.stats.log_progress();
                self.stats.write_stats();
            }
        }

        self.stats.log_progress();
        self.stats.write_stats();
        info!(
            games_played = self.stats.games_played(),
            stats_path = %self.stats.stats_path().display(),
            "Arena finished"
        );

        self.stats.snapshot()
    }
}
