//! Prediction model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One forecast hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Start of the predicted hour
    pub timestamp: DateTime<FixedOffset>,
    /// Predicted count, clamped to be non-negative
    pub value: f64,
}

impl Prediction {
    /// Create a prediction, clamping `value` to zero from below.
    pub fn new(timestamp: DateTime<FixedOffset>, value: f64) -> Self {
        Self {
            timestamp,
            value: value.max(0.0),
        }
    }

    /// Whole pedestrian count (fractional part truncated).
    pub fn count(&self) -> u64 {
        self.value.max(0.0).trunc() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(36000)
            .unwrap()
            .with_ymd_and_hms(2025, 4, 17, 10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_prediction_clamps_negative() {
        let p = Prediction::new(ts(), -12.5);
        assert_eq!(p.value, 0.0);
        assert_eq!(p.count(), 0);
    }

    #[test]
    fn test_prediction_count_truncates() {
        let p = Prediction::new(ts(), 41.9);
        assert_eq!(p.count(), 41);
    }
}
