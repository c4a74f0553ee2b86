//! Configuration system for metaflux.
//!
//! Load analysis configuration from TOML or YAML files to control
//! parallelism, verbosity, and classification tolerances without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use metaflux_config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_toml_str(r#"
//!     parallelism = 4
//!     verbose = true
//!
//!     [dead_reactions]
//!     epsilon = 1e-7
//! "#).unwrap();
//!
//! assert_eq!(config.parallelism, 4);
//! assert!(config.verbose);
//! assert_eq!(config.dead_reactions.epsilon, 1e-7);
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use metaflux_config::AnalysisConfig;
//!
//! let config = AnalysisConfig::load("analysis.toml").unwrap_or_default();
//! assert!(config.parallelism >= 1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

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

/// Main analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisConfig {
    /// Number of worker threads per analysis call.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Enables the fixed-width progress indicator on the diagnostic
    /// stream.
    #[serde(default)]
    pub verbose: bool,

    /// Rounding tolerance used when comparing a knockout objective
    /// against the reference optimum.
    #[serde(default = "default_rounding_tolerance")]
    pub rounding_tolerance: f64,

    /// Dead-reaction analysis settings.
    #[serde(default)]
    pub dead_reactions: DeadReactionConfig,
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_rounding_tolerance() -> f64 {
    1e-9
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            parallelism: default_parallelism(),
            verbose: false,
            rounding_tolerance: default_rounding_tolerance(),
            dead_reactions: DeadReactionConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid
    /// TOML.
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

    /// Sets the worker thread count.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Sets verbosity.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the dead-reaction epsilon.
    pub fn with_dead_reaction_epsilon(mut self, epsilon: f64) -> Self {
        self.dead_reactions.epsilon = epsilon;
        self
    }

    /// Checks the configuration for invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallelism == 0 {
            return Err(ConfigError::Invalid(
                "parallelism must be a positive integer".to_string(),
            ));
        }
        if !(self.dead_reactions.epsilon > 0.0) {
            return Err(ConfigError::Invalid(
                "dead_reactions.epsilon must be positive".to_string(),
            ));
        }
        if !(self.rounding_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(
                "rounding_tolerance must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Dead-reaction analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeadReactionConfig {
    /// A reaction is dead when both variability extremes fall below this
    /// magnitude.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_epsilon() -> f64 {
    1e-6
}

impl Default for DeadReactionConfig {
    fn default() -> Self {
        DeadReactionConfig {
            epsilon: default_epsilon(),
        }
    }
}

#[cfg(test)]
mod tests;
