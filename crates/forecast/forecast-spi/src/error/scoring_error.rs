//! Scoring error types

use thiserror::Error;

/// Errors raised by a [`Scorer`](crate::Scorer).
///
/// Scoring is deterministic, so none of these are worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// The model expects a column the feature vector does not carry
    #[error("Schema mismatch: model expects column '{column}' which the feature vector does not carry")]
    SchemaMismatch { column: String },

    /// The trained artifact is malformed
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    /// The model produced NaN or infinity
    #[error("Model produced a non-finite score: {0}")]
    NonFiniteOutput(f64),
}
