//! CLI configuration management.
//!
//! Configuration is read from a TOML file, then overridden by `MCVAR_*`
//! environment variables, then by command-line flags.
//!
//! ```toml
//! confidence_level = 5.0
//! seed = 42
//! parallel = false
//!
//! [simulation]
//! initial_price = 100.0
//! annual_drift = 0.10
//! annual_volatility = 0.20
//! horizon_years = 1.0
//! steps_per_year = 252
//! path_count = 1000
//! ```

use std::path::Path;

use mcvar_engine::mc::SimulationParameters;
use mcvar_risk::{DEFAULT_BINS, DEFAULT_CONFIDENCE_LEVEL};
use serde::Deserialize;
use thiserror::Error;

/// Number of paths drawn in the path preview chart.
pub const DEFAULT_PREVIEW_PATHS: usize = 50;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file or environment
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// mcvar configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct McvarConfig {
    /// Model and grid parameters used by `mcvar run`
    pub simulation: SimulationParameters,

    /// Percentile level for the floor, in (0, 100)
    pub confidence_level: f64,

    /// Seed for reproducible runs; drawn from entropy when absent
    pub seed: Option<u64>,

    /// Generate paths in parallel with per-path streams
    pub parallel: bool,

    /// Histogram bins for the terminal distribution chart
    pub histogram_bins: usize,

    /// Number of paths shown in the path preview chart
    pub preview_paths: usize,

    /// Log level
    pub log_level: String,
}

impl Default for McvarConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationParameters::default(),
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: None,
            parallel: false,
            histogram_bins: DEFAULT_BINS,
            preview_paths: DEFAULT_PREVIEW_PATHS,
            log_level: "info".to_string(),
        }
    }
}

impl McvarConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path` if it exists, otherwise use defaults.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `MCVAR_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Recognised keys: `MCVAR_SEED`, `MCVAR_PATHS`, `MCVAR_CONFIDENCE`,
    /// `MCVAR_PARALLEL`, `MCVAR_LOG_LEVEL`. Unparseable values are errors.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("MCVAR_SEED") {
            self.seed = Some(parse_var("MCVAR_SEED", &seed)?);
        }

        if let Some(paths) = lookup("MCVAR_PATHS") {
            self.simulation.path_count = parse_var("MCVAR_PATHS", &paths)?;
        }

        if let Some(confidence) = lookup("MCVAR_CONFIDENCE") {
            self.confidence_level = parse_var("MCVAR_CONFIDENCE", &confidence)?;
        }

        if let Some(parallel) = lookup("MCVAR_PARALLEL") {
            self.parallel = match parallel.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ConfigError::Parse(format!(
                        "MCVAR_PARALLEL: expected true/false, got '{}'",
                        other
                    )))
                }
            };
        }

        if let Some(log_level) = lookup("MCVAR_LOG_LEVEL") {
            self.log_level = log_level;
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if !(self.confidence_level > 0.0 && self.confidence_level < 100.0) {
            errors.push(format!(
                "confidence_level {} must lie in (0, 100)",
                self.confidence_level
            ));
        }

        if self.histogram_bins == 0 {
            errors.push("histogram_bins must be greater than 0".to_string());
        }

        if let Err(e) = self.simulation.validate() {
            errors.push(format!("simulation: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::Parse(format!("{}: '{}' ({})", key, value, e)))
}
