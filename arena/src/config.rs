//! Configuration for the arena
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_pig::{MAX_PLAYERS, MIN_PLAYERS};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_data_dir() -> String {
    CENTRAL_CONFIG.common.data_dir.clone()
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_players() -> u8 {
    CENTRAL_CONFIG.arena.players
}

fn default_target_score() -> u32 {
    CENTRAL_CONFIG.arena.target_score
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.arena.seed
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.arena.log_interval
}

fn default_max_rollout_steps() -> u32 {
    CENTRAL_CONFIG.arena.max_rollout_steps
}

fn default_num_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.num_simulations
}

fn default_exploration_constant() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_epsilon() -> f64 {
    CENTRAL_CONFIG.mcts.epsilon
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "arena")]
#[command(about = "Gambit Arena - MCTS versus random play in Pig")]
#[command(
    long_about = "Plays full games of Pig with one MCTS player seated among random players,
logging the results and writing a JSON stats snapshot to the data directory.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Directory for the stats snapshot
    #[arg(long, default_value_t = default_data_dir())]
    pub data_dir: String,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Players at the table (2-8)
    #[arg(long, default_value_t = default_players())]
    pub players: u8,

    /// Seat of the MCTS player
    #[arg(long, default_value_t = 0)]
    pub mcts_seat: u8,

    /// Score needed to win a game
    #[arg(long, default_value_t = default_target_score())]
    pub target_score: u32,

    /// Base seed for dice and every policy
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log progress every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Cap on actions per rollout and per arena game
    #[arg(long, default_value_t = default_max_rollout_steps())]
    pub max_rollout_steps: u32,

    /// Number of MCTS simulations per decision
    #[arg(long, default_value_t = default_num_simulations())]
    pub num_simulations: u32,

    /// UCT exploration constant
    #[arg(long, default_value_t = default_exploration_constant())]
    pub exploration_constant: f64,

    /// Guard added to visit counts
    #[arg(long, default_value_t = default_epsilon())]
    pub epsilon: f64,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(anyhow!(
                "players must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                self.players
            ));
        }

        if self.mcts_seat >= self.players {
            return Err(anyhow!(
                "mcts_seat {} is not a seat at a table of {}",
                self.mcts_seat,
                self.players
            ));
        }

        if self.target_score == 0 {
            return Err(anyhow!("target_score must be greater than 0"));
        }

        if self.max_rollout_steps == 0 {
            return Err(anyhow!("max_rollout_steps must be greater than 0"));
        }

        self.mcts_config().validate()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Search parameters for the MCTS player
    pub fn mcts_config(&self) -> mcts::MctsConfig {
        mcts::MctsConfig::default()
            .with_simulations(self.num_simulations)
            .with_exploration_constant(self.exploration_constant)
            .with_epsilon(self.epsilon)
    }

    /// Path of the JSON stats snapshot
    pub fn stats_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("arena_stats.json")
    }
}
