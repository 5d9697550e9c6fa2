//! Data error types.

use thiserror::Error;

/// Data source errors.
///
/// Each upstream failure mode is its own variant so callers can tell a
/// missing record apart from an unreachable provider.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// Transport failure or timeout talking to the provider
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Provider answered with a body that could not be understood
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid date format
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Provider answered but held no record for the requested sensor-hour
    #[error("No matching record for sensor '{sensor}' on {date} at hour {hour}")]
    NoMatchingRecord {
        sensor: String,
        date: String,
        hour: u32,
    },

    /// Provider reported a failure status
    #[error("API error [{status}]: {detail}")]
    ApiError { status: u16, detail: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Snapshot file could not be read or contained a malformed row
    #[error("Snapshot error: {0}")]
    SnapshotError(String),
}
