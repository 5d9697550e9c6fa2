//! Forecast error types

use thiserror::Error;

use super::ScoringError;

/// Errors that can occur while encoding features or forecasting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Malformed or missing input at the encoder boundary
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sensor has no buffer in the store
    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    /// Buffer is too short for the requested lag offset
    #[error("Insufficient history: need {required} hours, buffer holds {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// The scoring function rejected the features or failed internally
    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}
