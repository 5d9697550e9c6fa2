//! Live lag lookups for single-hour prediction.

use chrono::{DateTime, Duration, FixedOffset};
use data_spi::{DataError, LagProvider, LiveLags, Result};

/// Fetch the 24h-back and 168h-back counts for the hour starting at `timestamp`.
///
/// Both lookups run concurrently and the first failure wins; nothing is
/// retried.
pub async fn fetch_live_lags(
    provider: &dyn LagProvider,
    sensor: &str,
    timestamp: DateTime<FixedOffset>,
) -> Result<LiveLags> {
    let day_ago = hours_before(timestamp, 24)?;
    let week_ago = hours_before(timestamp, 168)?;

    let (lag_24h, lag_168h) = tokio::try_join!(
        provider.count_at(sensor, day_ago),
        provider.count_at(sensor, week_ago),
    )?;

    tracing::debug!(
        provider = provider.name(),
        sensor,
        lag_24h,
        lag_168h,
        "fetched live lags"
    );
    Ok(LiveLags::new(lag_24h, lag_168h))
}

fn hours_before(timestamp: DateTime<FixedOffset>, hours: i64) -> Result<DateTime<FixedOffset>> {
    timestamp
        .checked_sub_signed(Duration::hours(hours))
        .ok_or_else(|| {
            DataError::InvalidDate(format!("{} hours before {} is out of range", hours, timestamp))
        })
}
