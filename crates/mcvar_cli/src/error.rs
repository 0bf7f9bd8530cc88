//! Error types for the mcvar CLI.

use mcvar_engine::mc::SimulationError;
use mcvar_risk::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Interactive input that is not a number
    #[error("Please enter numbers only: could not parse {field} from '{input}'")]
    InputParse {
        /// Prompted field
        field: &'static str,
        /// Raw text entered
        input: String,
    },

    /// Input stream closed before all parameters were read
    #[error("Input ended before {0} was entered")]
    InputClosed(&'static str),

    /// Invalid simulation parameters
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Invalid analyzer input
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report serialisation error
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_parse_display() {
        let err = CliError::InputParse {
            field: "initial price",
            input: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Please enter numbers only: could not parse initial price from 'abc'"
        );
    }

    #[test]
    fn test_wraps_domain_errors() {
        let err: CliError = SimulationError::invalid("path_count", "must be at least 1").into();
        assert!(err.to_string().contains("path_count"));

        let err: CliError = RiskError::invalid_input("empty").into();
        assert_eq!(err.to_string(), "Invalid input: empty");
    }
}
