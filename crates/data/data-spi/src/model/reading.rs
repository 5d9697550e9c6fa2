//! Hourly sensor reading.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One observed hourly count for a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Sensor name
    pub sensor: String,
    /// Start of the counted hour
    pub timestamp: DateTime<FixedOffset>,
    /// Pedestrians counted in both directions
    pub count: u64,
}

impl SensorReading {
    /// Create a new reading.
    pub fn new(sensor: &str, timestamp: DateTime<FixedOffset>, count: u64) -> Self {
        Self {
            sensor: sensor.to_string(),
            timestamp,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reading_new() {
        let ts = FixedOffset::east_opt(36000)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
            .unwrap();
        let reading = SensorReading::new("Town Hall (West)", ts, 1520);
        assert_eq!(reading.sensor, "Town Hall (West)");
        assert_eq!(reading.timestamp, ts);
        assert_eq!(reading.count, 1520);
    }

    #[test]
    fn test_reading_serialize() {
        let ts = FixedOffset::east_opt(36000)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
            .unwrap();
        let json = serde_json::to_string(&SensorReading::new("A", ts, 3)).unwrap();
        assert_eq!(
            json,
            r#"{"sensor":"A","timestamp":"2025-01-01T09:00:00+10:00","count":3}"#
        );
    }
}
