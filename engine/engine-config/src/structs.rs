//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_exploration() -> f64 {
    defaults::exploration_constant()
}
fn d_epsilon() -> f64 {
    defaults::epsilon()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_players() -> u8 {
    defaults::players()
}
fn d_target_score() -> u32 {
    defaults::target_score()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}
fn d_max_rollout_steps() -> u32 {
    defaults::max_rollout_steps()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search parameters per decision
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_exploration")]
    pub exploration_constant: f64,
    #[serde(default = "d_epsilon")]
    pub epsilon: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            exploration_constant: defaults::exploration_constant(),
            epsilon: defaults::epsilon(),
        }
    }
}

/// Arena configuration: the games played by the arena binary
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_players")]
    pub players: u8,
    #[serde(default = "d_target_score")]
    pub target_score: u32,
    #[serde(default = "d_seed")]
    pub seed: u64,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
    #[serde(default = "d_max_rollout_steps")]
    pub max_rollout_steps: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            players: defaults::players(),
            target_score: defaults::target_score(),
            seed: defaults::seed(),
            log_interval: defaults::log_interval(),
            max_rollout_steps: defaults::max_rollout_steps(),
        }
    }
}
