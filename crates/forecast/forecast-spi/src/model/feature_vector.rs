//! Fixed-schema feature vector

use serde::{Deserialize, Serialize};

use super::columns;
use super::LagSource;

/// Features for one (sensor, hour) pair.
///
/// Built only by the feature encoder, which guarantees every required field
/// is present and finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub sensor: String,
    /// Hour of day in AEST, 0-23
    pub hour_of_day: u32,
    pub lag_24h: f64,
    pub lag_168h: f64,
    pub lag_1h: Option<f64>,
    pub rolling_mean_3h: Option<f64>,
    pub is_holiday: bool,
    pub is_lockdown: bool,
    /// Full weekday name, e.g. "Monday"
    pub day_of_week: String,
    pub source: LagSource,
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

impl FeatureVector {
    /// Numeric column value by trained column name.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            columns::HOUR_DAY => Some(self.hour_of_day as f64),
            columns::LAG_24H => Some(self.lag_24h),
            columns::LAG_168H => Some(self.lag_168h),
            columns::LAG_1H => self.lag_1h,
            columns::ROLL_3H => self.rolling_mean_3h,
            columns::IS_HOLIDAY => Some(self.is_holiday as u8 as f64),
            columns::IS_LOCKDOWN => Some(self.is_lockdown as u8 as f64),
            _ => None,
        }
    }

    /// Categorical column value by trained column name. Flags render as "0"/"1".
    pub fn categorical(&self, column: &str) -> Option<String> {
        match column {
            columns::SENSOR_NAME => Some(self.sensor.clone()),
            columns::DAY_OF_WEEK => Some(self.day_of_week.clone()),
            columns::IS_HOLIDAY => Some(flag(self.is_holiday)),
            columns::IS_LOCKDOWN => Some(flag(self.is_lockdown)),
            columns::HOUR_DAY => Some(self.hour_of_day.to_string()),
            _ => None,
        }
    }
}
