//! Arena - MCTS versus random play in Pig
//!
//! A batch process that:
//! 1. Seats one MCTS player among uniformly random players
//! 2. Plays the configured number of games with seeded dice
//! 3. Writes win rates and search timing to `./data/arena_stats.json`

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod arena;
mod config;
mod game;
mod mcts_policy;
mod policy;
mod stats;

use crate::arena::Arena;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");
    info!(
        games = config.games,
        players = config.players,
        seed = config.seed,
        "Arena will play {} games",
        config.games
    );

    let mut arena = Arena::new(config)?;
    let snapshot = arena.run();

    info!(
        games_played = snapshot.games_played,
        games_failed = snapshot.games_failed,
        mcts_win_rate = format!("{:.3}", snapshot.mcts_win_rate),
        runtime_seconds = format!("{:.2}", snapshot.runtime_seconds),
        "Arena completed"
    );

    Ok(())
}
