//! Gambit configuration: search parameters and arena settings.
//!
//! Values come from three layers, later ones winning:
//! `config.defaults.toml` (compiled in), a `config.toml` found by
//! [`find_config_file`], and `GAMBIT_<SECTION>_<KEY>` environment variables.
//! The arena's command line sits on top of all three.
//!
//! ```text
//! GAMBIT_MCTS_NUM_SIMULATIONS=200 GAMBIT_ARENA_PLAYERS=4 cargo run -p arena
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, find_config_file, load_config, load_from_path, CONFIG_ENV_VAR,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;
