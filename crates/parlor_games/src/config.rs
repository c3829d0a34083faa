//! Game configuration loaded from TOML.
//!
//! Every field is optional in the file. Missing setup answers (grid size,
//! player counts, default names, who goes first) are asked interactively.
//!
//! ```toml
//! grid_size = 3
//! score_limit = 3
//! humans = 1
//! computers = 1
//! default_names = true
//! strategy = "auto"
//! max_search_nodes = 2000000
//! seed = 42
//! start_order = "random"
//! ```

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use parlor_tictactoe::{MAX_DIMENSION, StartOrder, Strategy, StrategyChoice};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cells per side; asked when absent.
    #[serde(default)]
    grid_size: Option<usize>,

    /// Round wins needed to take a tournament.
    #[serde(default = "default_score_limit")]
    score_limit: u32,

    /// Number of human players; asked when absent.
    #[serde(default)]
    humans: Option<u32>,

    /// Number of computer players; asked when absent.
    #[serde(default)]
    computers: Option<u32>,

    /// Skip name and marker questions; asked when absent.
    #[serde(default)]
    default_names: Option<bool>,

    /// How computers pick their moves.
    #[serde(default)]
    strategy: StrategyChoice,

    /// Exhaustive search budget in board states; 0 means unbounded.
    #[serde(default = "default_max_search_nodes")]
    max_search_nodes: u64,

    /// Seed for reproducible games; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Who goes first in every tournament; asked when absent.
    #[serde(default)]
    start_order: Option<StartOrder>,
}

fn default_score_limit() -> u32 {
    3
}

fn default_max_search_nodes() -> u64 {
    2_000_000
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: None,
            score_limit: default_score_limit(),
            humans: None,
            computers: None,
            default_names: None,
            strategy: StrategyChoice::default(),
            max_search_nodes: default_max_search_nodes(),
            seed: None,
            start_order: None,
        }
    }
}

/// Values given on the command line, each replacing the file's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Cells per side.
    pub grid_size: Option<usize>,
    /// Round wins needed.
    pub score_limit: Option<u32>,
    /// Human players.
    pub humans: Option<u32>,
    /// Computer players.
    pub computers: Option<u32>,
    /// Skip name and marker questions.
    pub default_names: Option<bool>,
    /// Move strategy for computers.
    pub strategy: Option<StrategyChoice>,
    /// Exhaustive search budget.
    pub max_search_nodes: Option<u64>,
    /// RNG seed.
    pub seed: Option<u64>,
    /// Who goes first.
    pub start_order: Option<StartOrder>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or holds invalid values.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(score_limit = config.score_limit, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces file values with whatever was given on the command line.
    ///
    /// # Errors
    ///
    /// Fails if the merged configuration is invalid.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let ConfigOverrides {
            grid_size,
            score_limit,
            humans,
            computers,
            default_names,
            strategy,
            max_search_nodes,
            seed,
            start_order,
        } = overrides;

        self.grid_size = grid_size.or(self.grid_size);
        self.score_limit = score_limit.unwrap_or(self.score_limit);
        self.humans = humans.or(self.humans);
        self.computers = computers.or(self.computers);
        self.default_names = default_names.or(self.default_names);
        self.strategy = strategy.unwrap_or(self.strategy);
        self.max_search_nodes = max_search_nodes.unwrap_or(self.max_search_nodes);
        self.seed = seed.or(self.seed);
        self.start_order = start_order.or(self.start_order);

        self.validate()?;
        Ok(self)
    }

    /// Checks values the file format cannot rule out.
    ///
    /// # Errors
    ///
    /// Rejects a zero or oversized grid, a zero score limit, and player
    /// counts that are both given but add up to fewer than two.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.grid_size {
            Some(0) => return Err(ConfigError::new("grid_size must be at least 1")),
            Some(size) if size > MAX_DIMENSION => {
                return Err(ConfigError::new(format!(
                    "grid_size must be at most {}, got {}",
                    MAX_DIMENSION, size
                )));
            }
            _ => {}
        }
        if self.score_limit == 0 {
            return Err(ConfigError::new("score_limit must be at least 1"));
        }
        if let (Some(humans), Some(computers)) = (self.humans, self.computers) {
            if humans.saturating_add(computers) < 2 {
                return Err(ConfigError::new(format!(
                    "Need at least two players, got {} humans and {} computers",
                    humans, computers
                )));
            }
        }
        Ok(())
    }

    /// The search budget, `None` when unbounded.
    pub fn search_budget(&self) -> Option<u64> {
        (self.max_search_nodes > 0).then_some(self.max_search_nodes)
    }

    /// The strategy computers use on a grid of `dimension`.
    pub fn strategy_for(&self, dimension: usize) -> Strategy {
        self.strategy.resolve(dimension, self.search_budget())
    }

    /// A random source seeded from `seed`, or from entropy when unset.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
