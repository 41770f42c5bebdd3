//! Configuration system for Fairplay.
//!
//! Load tier search configuration from TOML or YAML files to control the
//! tier size ranges, trial budget, seeding, threading and termination without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use fairplay_config::FairplayConfig;
//! use std::time::Duration;
//!
//! let config = FairplayConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [search]
//!     min_top_size = 4
//!     max_top_size = 6
//!     trials_per_combination = 250
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.search.min_top_size, 4);
//! assert_eq!(config.search.min_bottom_size, 5);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use fairplay_config::FairplayConfig;
//!
//! let config = FairplayConfig::load("fairplay.toml").unwrap_or_default();
//! assert_eq!(config.search.trials_per_combination, 100);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used in reproducible mode when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main Fairplay configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FairplayConfig {
    /// Environment mode affecting reproducibility.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of worker threads for parallel trial scoring.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Tier size ranges and trial budget.
    #[serde(default)]
    pub search: SearchConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl FairplayConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the size ranges and budget describe at least one trial.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()?;
        if let ThreadCount::Count(0) = self.thread_count {
            return Err(ConfigError::Invalid(
                "thread_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Caps the number of trials run before stopping.
    pub fn with_trial_count_limit(mut self, trials: u64) -> Self {
        self.termination = Some(TerminationConfig {
            trial_count_limit: Some(trials),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Seed to use for this run.
    ///
    /// Reproducible mode falls back to [`DEFAULT_SEED`]; non-reproducible mode
    /// returns `None` unless a seed was set explicitly.
    pub fn effective_seed(&self) -> Option<u64> {
        match (self.random_seed, self.environment_mode) {
            (Some(seed), _) => Some(seed),
            (None, EnvironmentMode::Reproducible) => Some(DEFAULT_SEED),
            (None, EnvironmentMode::NonReproducible) => None,
        }
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// Environment mode affecting search behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeded, deterministic trials.
    #[default]
    Reproducible,

    /// Seeded from OS entropy unless a seed is given.
    NonReproducible,
}

/// Worker thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Let rayon pick (one per core).
    #[default]
    Auto,

    /// Run every trial on the calling thread.
    None,

    /// Specific number of threads.
    Count(usize),
}

/// Tier size ranges and trial budget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    pub min_top_size: usize,
    pub max_top_size: usize,
    pub min_bottom_size: usize,
    pub max_bottom_size: usize,
    /// Independent random trials for each `(top, bottom)` size pair.
    pub trials_per_combination: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_top_size: 5,
            max_top_size: 8,
            min_bottom_size: 5,
            max_bottom_size: 8,
            trials_per_combination: 100,
        }
    }
}

impl SearchConfig {
    /// Number of `(top, bottom)` size pairs in the configured ranges,
    /// saturating at `usize::MAX`.
    pub fn combination_count(&self) -> usize {
        let span = |min: usize, max: usize| {
            if min > max {
                0
            } else {
                (max - min).saturating_add(1)
            }
        };
        span(self.min_top_size, self.max_top_size)
            .saturating_mul(span(self.min_bottom_size, self.max_bottom_size))
    }

    /// Total number of trials a full search runs, saturating at `u64::MAX`.
    pub fn total_trials(&self) -> u64 {
        (self.combination_count() as u64).saturating_mul(u64::from(self.trials_per_combination))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_top_size > self.max_top_size {
            return Err(ConfigError::Invalid(format!(
                "min_top_size {} exceeds max_top_size {}",
                self.min_top_size, self.max_top_size
            )));
        }
        if self.min_bottom_size > self.max_bottom_size {
            return Err(ConfigError::Invalid(format!(
                "min_bottom_size {} exceeds max_bottom_size {}",
                self.min_bottom_size, self.max_bottom_size
            )));
        }
        if self.trials_per_combination == 0 {
            return Err(ConfigError::Invalid(
                "trials_per_combination must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Termination configuration.
///
/// Limits only cancel a search early; without any the full trial budget runs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend searching.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend searching.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum number of trials to run.
    pub trial_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}
