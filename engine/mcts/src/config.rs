//! MCTS configuration parameters.

use crate::search::SearchError;

/// Default number of simulations per decision.
pub const DEFAULT_NUM_SIMULATIONS: u32 = 10;

/// Default numeric guard added to visit counts in divisions and logarithms.
pub const DEFAULT_EPSILON: f64 = 1e-8;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of simulations to run per decision.
    pub num_simulations: u32,

    /// Exploration constant `C` of the UCT formula.
    /// Higher values favor under-visited outcomes, lower values favor the
    /// observed win rate. Defaults to √2.
    pub exploration_constant: f64,

    /// Guard added to visit counts so that unvisited children yield a very
    /// large, finite exploration term instead of dividing by zero.
    pub epsilon: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            exploration_constant: std::f64::consts::SQRT_2,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl MctsConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with a larger budget for tests that need the search
    /// to converge.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 200,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the numeric guard.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_simulations == 0 {
            return Err(SearchError::InvalidConfig(
                "num_simulations must be > 0".into(),
            ));
        }
        if !(self.exploration_constant.is_finite() && self.exploration_constant >= 0.0) {
            return Err(SearchError::InvalidConfig(
                "exploration_constant must be finite and >= 0".into(),
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SearchError::InvalidConfig(
                "epsilon must be finite and > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 10);
        assert!((config.exploration_constant - 2f64.sqrt()).abs() < 1e-12);
        assert!((config.epsilon - 1e-8).abs() < 1e-20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(100)
            .with_exploration_constant(0.5)
            .with_epsilon(1e-6);

        assert_eq!(config.num_simulations, 100);
        assert!((config.exploration_constant - 0.5).abs() < 1e-12);
        assert!((config.epsilon - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_validate_rejects_zero_simulations() {
        let err = MctsConfig::default()
            .with_simulations(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("num_simulations"));
    }

    #[test]
    fn test_validate_rejects_bad_exploration_constant() {
        assert!(MctsConfig::default()
            .with_exploration_constant(-1.0)
            .validate()
            .is_err());
        assert!(MctsConfig::default()
            .with_exploration_constant(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_epsilon() {
        let err = MctsConfig::default().with_epsilon(0.0).validate().unwrap_err();
        assert!(err.to_string().contains("epsilon"));
    }
}
