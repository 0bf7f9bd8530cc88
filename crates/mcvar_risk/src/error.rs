//! Risk analysis error types.

use thiserror::Error;

/// Errors raised by the risk analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    /// Malformed analyzer input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RiskError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
