//! Arena statistics tracking and persistence.
//!
//! This module provides statistics tracking for the arena, including:
//! - Game counts and wins per seat
//! - MCTS search timing
//!
//! Stats are written to a JSON file after every logged batch of games.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::game::GameRecord;

/// Aggregated arena statistics.
#[derive(Debug)]
pub struct ArenaStats {
    /// Games finished
    games_played: u32,
    /// Games abandoned with an error
    games_failed: u32,
    /// Wins per seat
    wins: Vec<u32>,
    /// Seat of the MCTS player
    mcts_seat: u8,
    /// Actions played across all games
    total_actions: u64,
    /// MCTS searches performed
    mcts_searches: u64,
    /// Time spent in those searches
    mcts_search_time: Duration,
    /// Start time for rate calculations
    start_time: Instant,
    /// Path to write stats file
    stats_path: PathBuf,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArenaStatsSnapshot {
    pub games_played: u32,
    pub games_failed: u32,
    pub wins: Vec<u32>,
    pub mcts_seat: u8,
    pub mcts_win_rate: f64,
    pub avg_game_length: f64,
    pub mcts_searches: u64,
    pub mcts_avg_search_ms: f64,
    pub games_per_second: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl ArenaStats {
    /// Create new stats tracker writing to `stats_path`.
    pub fn new(stats_path: PathBuf, players: u8, mcts_seat: u8) -> Self {
        // Ensure data directory exists
        if let Some(dir) = stats_path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!("Failed to create data directory: {}", e);
            }
        }

        Self {
            games_played: 0,
            games_failed: 0,
            wins: vec![0; players as usize],
            mcts_seat,
            total_actions: 0,
            mcts_searches: 0,
            mcts_search_time: Duration::ZERO,
            start_time: Instant::now(),
            stats_path,
        }
    }

    /// Record a finished game.
    pub fn record_game(&mut self, record: &GameRecord) {
        self.games_played += 1;
        self.total_actions += record.actions as u64;
        if let Some(wins) = self.wins.get_mut(record.winner as usize) {
            *wins += 1;
        }
    }

    /// Record a game abandoned with an error.
    pub fn record_failure(&mut self) {
        self.games_failed += 1;
    }

    /// Record MCTS performance for a game.
    pub fn record_mcts_stats(&mut self, searches: u32, search_time: Duration) {
        self.mcts_searches += searches as u64;
        self.mcts_search_time += search_time;
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> ArenaStatsSnapshot {
        let runtime = self.start_time.elapsed().as_secs_f64();
        let games = self.games_played;

        let mcts_wins = self
            .wins
            .get(self.mcts_seat as usize)
            .copied()
            .unwrap_or(0);
        let mcts_win_rate = if games > 0 {
            mcts_wins as f64 / games as f64
        } else {
            0.0
        };

        let avg_game_length = if games > 0 {
            self.total_actions as f64 / games as f64
        } else {
            0.0
        };

        let mcts_avg_search_ms = if self.mcts_searches > 0 {
            self.mcts_search_time.as_secs_f64() * 1000.0 / self.mcts_searches as f64
        } else {
            0.0
        };

        let games_per_second = if runtime > 0.0 {
            games as f64 / runtime
        } else {
            0.0
        };

        ArenaStatsSnapshot {
            games_played: games,
            games_failed: self.games_failed,
            wins: self.wins.clone(),
            mcts_seat: self.mcts_seat,
            mcts_win_rate,
            avg_game_length,
            mcts_searches: self.mcts_searches,
            mcts_avg_search_ms,
            games_per_second,
            runtime_seconds: runtime,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Log a one-line progress summary.
    pub fn log_progress(&self) {
        let snapshot = self.snapshot();
        info!(
            games = snapshot.games_played,
            failed = snapshot.games_failed,
            wins = ?snapshot.wins,
            mcts_win_rate = format!("{:.3}", snapshot.mcts_win_rate),
            avg_game_length = format!("{:.1}", snapshot.avg_game_length),
            mcts_avg_search_ms = format!("{:.2}", snapshot.mcts_avg_search_ms),
            "Arena progress"
        );
    }

    /// Write stats to JSON file (atomic write-then-rename).
    pub fn write_stats(&self) {
        let snapshot = self.snapshot();

        // Serialize to JSON
        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize arena stats: {}", e);
                return;
            }
        };

        // Write to temp file then rename (atomic on most filesystems)
        let temp_path = self.stats_path.with_extension("json.tmp");
        match fs::File::create(&temp_path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(json.as_bytes()) {
                    warn!("Failed to write arena stats: {}", e);
                    return;
                }
            }
            Err(e) => {
                warn!("Failed to create temp stats file: {}", e);
                return;
            }
        }

        if let Err(e) = fs::rename(&temp_path, &self.stats_path) {
            warn!("Failed to rename stats file: {}", e);
            // Try to clean up temp file
            let _ = fs::remove_file(&temp_path);
            return;
        }

        debug!("Wrote arena stats to {}", self.stats_path.display());
    }

    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }
}
