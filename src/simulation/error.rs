//! Error types and handling
//!
//! This module contains error types and error handling for the simulation.
//! Every core error aborts the run and nothing is retried.

use crate::types::{ConfigError, ConfigValidationError};
use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Invalid grid size, department mapping or parameter
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A location identifier or coordinate outside the configured grid
    #[error("Invalid location reference {reference}: outside the {grid_size}x{grid_size} grid")]
    InvalidReference {
        /// The offending reference as displayed to the user
        reference: String,
        /// Side length of the grid
        grid_size: usize,
    },

    /// A negative or non-finite distance increment
    #[error("Invalid metric update: distance increment {0} must be a non-negative number")]
    InvalidMetric(f64),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an invalid reference error
    pub fn invalid_reference(reference: impl Into<String>, grid_size: usize) -> Self {
        Self::InvalidReference { reference: reference.into(), grid_size }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_)
            | SimulationError::InvalidReference { .. }
            | SimulationError::InvalidMetric(_) => false,
            SimulationError::IoError(_) | SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::InvalidReference { .. } => "Invalid Reference",
            SimulationError::InvalidMetric(_) => "Invalid Metric",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
