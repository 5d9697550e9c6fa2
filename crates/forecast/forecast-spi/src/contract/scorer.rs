//! Scoring function trait

use crate::error::ScoringError;
use crate::model::{FeatureSchema, FeatureVector};

/// Trained regression model plus its feature-encoding transform.
///
/// Implementations must be deterministic for a fixed artifact and free of
/// side effects. The returned value may be negative; callers clamp.
///
/// # Example
///
/// ```rust,ignore
/// use forecast_spi::{FeatureVector, Scorer};
///
/// fn score_all<S: Scorer>(scorer: &S, rows: &[FeatureVector]) -> Vec<f64> {
///     rows.iter().filter_map(|row| scorer.score(row).ok()).collect()
/// }
/// ```
pub trait Scorer: Send + Sync {
    /// Model name, used in logs and health output.
    fn name(&self) -> &str;

    /// Optional inputs this model was trained with.
    fn schema(&self) -> FeatureSchema;

    /// Score one feature vector.
    fn score(&self, features: &FeatureVector) -> Result<f64, ScoringError>;
}
