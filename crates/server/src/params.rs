//! Query parameter parsing.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use data_facade::{floor_hour, parse_timestamp, to_aest, DataError};
use forecast_facade::ForecastError;

/// Non-empty sensor name.
pub fn required_sensor(sensor: Option<String>) -> Result<String, ForecastError> {
    match sensor {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ForecastError::InvalidInput(
            "query parameter 'sensor' is required".to_string(),
        )),
    }
}

/// Optional positive integer horizon.
pub fn parse_hours(hours: Option<&str>) -> Result<Option<usize>, ForecastError> {
    hours
        .map(|raw| {
            raw.trim().parse::<usize>().map_err(|_| {
                ForecastError::InvalidInput(format!(
                    "hours must be a positive integer, got '{}'",
                    raw
                ))
            })
        })
        .transpose()
}

/// Hour a request refers to, floored to the whole hour in AEST.
///
/// Accepts RFC 3339 with an offset, or a naive timestamp read as AEST.
/// Without a value, the next whole hour after `now` is used.
pub fn resolve_hour(
    value: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateTime<FixedOffset>, ForecastError> {
    match value {
        None => floor_hour(to_aest(&now))
            .map_err(invalid)?
            .checked_add_signed(Duration::hours(1))
            .ok_or_else(|| ForecastError::InvalidInput(format!("no whole hour follows {}", now))),
        Some(raw) => parse_timestamp(raw)
            .and_then(floor_hour)
            .map_err(invalid),
    }
}

fn invalid(err: DataError) -> ForecastError {
    ForecastError::InvalidInput(err.to_string())
}
