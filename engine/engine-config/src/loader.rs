//! Finding, parsing and overriding the Gambit config file.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Env var naming an explicit config file. Checked before the search paths.
pub const CONFIG_ENV_VAR: &str = "GAMBIT_CONFIG";

/// Config files tried relative to the working directory. The arena is run
/// either from the workspace root or from `arena/`.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// The config file this process should read, if any.
pub fn find_config_file() -> Option<PathBuf> {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    locate(explicit, CONFIG_SEARCH_PATHS)
}

/// `explicit` if it names a file, otherwise the first candidate that does.
pub(crate) fn locate(explicit: Option<PathBuf>, candidates: &[&str]) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path);
        }
        warn!(path = %path.display(), "{} is not a file, searching defaults", CONFIG_ENV_VAR);
    }

    candidates.iter().map(PathBuf::from).find(|path| path.is_file())
}

/// Central configuration for this process with `GAMBIT_*` overrides applied.
pub fn load_config() -> CentralConfig {
    match find_config_file() {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            load_from_path(&path)
        }
        None => {
            debug!("No config.toml found, using embedded defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Read one config file. An unreadable or malformed file is reported and
/// replaced by the embedded defaults; env overrides apply either way.
pub fn load_from_path(path: &Path) -> CentralConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| toml::from_str::<CentralConfig>(&content).map_err(|e| e.to_string()));

    let config = parsed.unwrap_or_else(|error| {
        warn!(path = %path.display(), %error, "Ignoring config file, using defaults");
        CentralConfig::default()
    });

    apply_env_overrides(config)
}

/// Assign `$key` to a config field when set. The `parse` arm skips values
/// that do not parse.
macro_rules! env_override {
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: GAMBIT_<SECTION>_<KEY>.
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.data_dir, "GAMBIT_COMMON_DATA_DIR");
    env_override!(config, common.log_level, "GAMBIT_COMMON_LOG_LEVEL");

    // MCTS
    env_override!(
        config,
        mcts.num_simulations,
        "GAMBIT_MCTS_NUM_SIMULATIONS",
        parse
    );
    env_override!(
        config,
        mcts.exploration_constant,
        "GAMBIT_MCTS_EXPLORATION_CONSTANT",
        parse
    );
    env_override!(config, mcts.epsilon, "GAMBIT_MCTS_EPSILON", parse);

    // Arena
    env_override!(config, arena.games, "GAMBIT_ARENA_GAMES", parse);
    env_override!(config, arena.players, "GAMBIT_ARENA_PLAYERS", parse);
    env_override!(
        config,
        arena.target_score,
        "GAMBIT_ARENA_TARGET_SCORE",
        parse
    );
    env_override!(config, arena.seed, "GAMBIT_ARENA_SEED", parse);
    env_override!(
        config,
        arena.log_interval,
        "GAMBIT_ARENA_LOG_INTERVAL",
        parse
    );
    env_override!(
        config,
        arena.max_rollout_steps,
        "GAMBIT_ARENA_MAX_ROLLOUT_STEPS",
        parse
    );

    config
}
