//! Feature encoding for one sensor-hour.

use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Timelike};
use data_spi::{localize, to_aest};
use forecast_spi::{FeatureVector, ForecastError, LagInputs, Result};

use crate::calendar::Calendar;

/// Builds [`FeatureVector`]s from a sensor, an hour and its lag inputs.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    calendar: Arc<Calendar>,
}

impl FeatureEncoder {
    pub fn new(calendar: Arc<Calendar>) -> Self {
        Self { calendar }
    }

    /// Encoder backed by the Victorian calendar.
    pub fn victoria() -> Self {
        Self::new(Arc::new(Calendar::victoria()))
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Encode one sensor-hour. Any offset is accepted; calendar fields are
    /// computed on AEST wall-clock time.
    pub fn encode<Tz: TimeZone>(
        &self,
        sensor: &str,
        timestamp: &DateTime<Tz>,
        lags: &LagInputs,
    ) -> Result<FeatureVector> {
        if sensor.trim().is_empty() {
            return Err(ForecastError::InvalidInput(
                "sensor name must not be empty".to_string(),
            ));
        }
        for (name, value) in lags.values() {
            if !value.is_finite() || value < 0.0 {
                return Err(ForecastError::InvalidInput(format!(
                    "{} must be a finite non-negative count, got {}",
                    name, value
                )));
            }
        }

        let local: DateTime<FixedOffset> = to_aest(timestamp);
        Ok(FeatureVector {
            sensor: sensor.to_string(),
            hour_of_day: local.hour(),
            lag_24h: lags.lag_24h,
            lag_168h: lags.lag_168h,
            lag_1h: lags.lag_1h,
            rolling_mean_3h: lags.rolling_mean_3h,
            is_holiday: self.calendar.is_holiday(local.date_naive()),
            is_lockdown: self.calendar.is_lockdown(&local),
            day_of_week: weekday_name(local.weekday()).to_string(),
            source: lags.source,
        })
    }

    /// Encode a naive timestamp interpreted as AEST.
    pub fn encode_local(
        &self,
        sensor: &str,
        timestamp: NaiveDateTime,
        lags: &LagInputs,
    ) -> Result<FeatureVector> {
        let local =
            localize(timestamp).map_err(|e| ForecastError::InvalidInput(e.to_string()))?;
        self.encode(sensor, &local, lags)
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::victoria()
    }
}

/// Full English weekday name, as seen by the model at training time.
fn weekday_name(day: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match day {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}
