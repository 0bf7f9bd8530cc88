//! Error types for the simulation engine.

use thiserror::Error;

/// Errors raised while validating simulation parameters.
///
/// Every variant is detected before any random draw is consumed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Malformed or out-of-domain parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },
}

impl SimulationError {
    /// Creates an [`InvalidParameter`](Self::InvalidParameter) error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}
