//! # Search Configuration
//!
//! Tunables for both engines. Every struct derives serde with
//! `#[serde(default)]`, so a partial JSON/TOML document fills in the rest.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Alpha-beta search settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Deepest iteration (or the fixed depth without iterative deepening).
    pub max_depth: u32,
    /// Wall-clock limit; `None` searches until `max_depth` completes.
    pub time_limit_ms: Option<u64>,
    pub use_iterative_deepening: bool,
    pub use_move_ordering: bool,
    /// Nominal transposition-table budget.
    pub tt_size_bytes: usize,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            time_limit_ms: Some(30_000),
            use_iterative_deepening: true,
            use_move_ordering: true,
            tt_size_bytes: 64 * 1024 * 1024,
        }
    }
}

impl MinimaxConfig {
    /// Fixed-depth search without a clock.
    pub fn fixed_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            time_limit_ms: None,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(EngineError::InvalidConfig("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

/// When an MCTS search stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBudget {
    /// Run exactly this many rollouts.
    Simulations(u32),
    /// Run until this many milliseconds have elapsed.
    TimeMs(u64),
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::Simulations(10_000)
    }
}

/// Monte Carlo tree search settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    pub budget: SearchBudget,
    /// UCT exploration weight `C`.
    pub exploration_constant: f64,
    /// Solve rollouts exactly with alpha-beta once few cells remain.
    pub use_minimax_hybrid: bool,
    /// Empty-cell count at or below which the hybrid solver takes over.
    pub minimax_threshold: usize,
    /// How many root children to report in the result.
    pub top_moves: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::default(),
            exploration_constant: std::f64::consts::SQRT_2,
            use_minimax_hybrid: false,
            minimax_threshold: 8,
            top_moves: 10,
            seed: None,
        }
    }
}

impl MCTSConfig {
    pub fn with_simulations(simulations: u32) -> Self {
        Self {
            budget: SearchBudget::Simulations(simulations),
            ..Self::default()
        }
    }

    pub fn with_time_limit_ms(time_limit_ms: u64) -> Self {
        Self {
            budget: SearchBudget::TimeMs(time_limit_ms),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimax_defaults() {
        let config = MinimaxConfig::default();
        assert_eq!(config.max_depth, 20);
        assert_eq!(config.time_limit_ms, Some(30_000));
        assert!(config.use_iterative_deepening);
        assert!(config.use_move_ordering);
        assert_eq!(config.tt_size_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: MinimaxConfig = serde_json::from_str(r#"{"max_depth": 6}"#).unwrap();
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.time_limit_ms, Some(30_000));

        let config: MCTSConfig =
            serde_json::from_str(r#"{"budget": {"time_ms": 500}, "use_minimax_hybrid": true}"#)
                .unwrap();
        assert_eq!(config.budget, SearchBudget::TimeMs(500));
        assert!(config.use_minimax_hybrid);
        assert_eq!(config.minimax_threshold, 8);
        assert_eq!(config.top_moves, 10);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MCTSConfig {
            seed: Some(7),
            ..MCTSConfig::with_simulations(250)
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MCTSConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(MinimaxConfig::fixed_depth(0).validate().is_err());
        assert!(MinimaxConfig::fixed_depth(3).validate().is_ok());

        let config = MCTSConfig {
            exploration_constant: f64::NAN,
            ..MCTSConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
