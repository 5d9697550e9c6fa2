//! Live lag provider trait definition.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::error::Result;

/// Source of observed hourly counts used as live lag features.
///
/// Implementations answer a single question: how many pedestrians did
/// `sensor` count in the hour starting at `timestamp`. Exactly one record is
/// expected per query; an absent record is [`DataError::NoMatchingRecord`],
/// never a default value.
///
/// [`DataError::NoMatchingRecord`]: crate::DataError::NoMatchingRecord
#[async_trait]
pub trait LagProvider: Send + Sync {
    /// Provider name.
    fn name(&self) -> &str;

    /// Fetch the observed count for one sensor-hour.
    async fn count_at(&self, sensor: &str, timestamp: DateTime<FixedOffset>) -> Result<f64>;
}
