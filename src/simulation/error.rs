//! Error types and handling
//!
//! This module contains error types for the simulation pipeline. Allocation and
//! metrics never fail on valid input; errors surface only while validating
//! configuration or while building the samplers. Loading a configuration file
//! reports its own [`ConfigError`](crate::types::ConfigError).

use thiserror::Error;

use crate::types::ConfigValidationError;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigValidationError),

    /// A sampling distribution could not be constructed
    #[error("Distribution setup failed: {0}")]
    DistributionError(String),
}

impl SimulationError {
    /// Create a distribution error
    pub fn distribution_error(msg: impl Into<String>) -> Self {
        Self::DistributionError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::InvalidConfiguration(_) => "Configuration",
            SimulationError::DistributionError(_) => "Distribution",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RequestClass;

    #[test]
    fn test_error_creation() {
        let distribution_error = SimulationError::distribution_error("shape must be positive");
        assert!(matches!(distribution_error, SimulationError::DistributionError(_)));
        assert_eq!(
            distribution_error.to_string(),
            "Distribution setup failed: shape must be positive"
        );
    }

    #[test]
    fn test_error_from_validation_error() {
        let error: SimulationError = ConfigValidationError::InvalidDaysCount(0).into();
        assert!(matches!(error, SimulationError::InvalidConfiguration(_)));
        assert_eq!(
            error.to_string(),
            "Invalid configuration: Days count must be greater than 0, got 0"
        );
    }

    #[test]
    fn test_error_categories() {
        let slot: SimulationError = ConfigValidationError::InvalidSlotDuration {
            class: RequestClass::ClassA,
            value: -1.0,
        }
        .into();
        assert_eq!(slot.category(), "Configuration");
        assert_eq!(SimulationError::distribution_error("x").category(), "Distribution");
    }

    #[test]
    fn test_simulation_result_type() {
        let success: SimulationResult<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: SimulationResult<i32> = Err(SimulationError::distribution_error("Test"));
        assert!(failure.is_err());
    }
}
