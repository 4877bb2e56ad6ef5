//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the binary and the documented defaults can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    data_dir: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    num_simulations: u32,
    exploration_constant: f64,
    epsilon: f64,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    players: u8,
    target_score: u32,
    seed: u64,
    log_interval: u32,
    max_rollout_steps: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn num_simulations() -> u32 {
    DEFAULTS.mcts.num_simulations
}
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn epsilon() -> f64 {
    DEFAULTS.mcts.epsilon
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn players() -> u8 {
    DEFAULTS.arena.players
}
pub fn target_score() -> u32 {
    DEFAULTS.arena.target_score
}
pub fn seed() -> u64 {
    DEFAULTS.arena.seed
}
pub fn log_interval() -> u32 {
    DEFAULTS.arena.log_interval
}
pub fn max_rollout_steps() -> u32 {
    DEFAULTS.arena.max_rollout_steps
}
