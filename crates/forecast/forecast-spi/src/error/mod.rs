//! Error module containing error types and result aliases

mod forecast_error;
mod scoring_error;

pub use forecast_error::ForecastError;
pub use scoring_error::ScoringError;

/// Result type for forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;
