//! Lag inputs handed to the feature encoder.

use serde::{Deserialize, Serialize};

/// Where the lag values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LagSource {
    /// Read back from a per-sensor temporal buffer, possibly synthetic
    Buffer,
    /// Supplied by a live provider for a single-hour prediction
    External,
}

/// Numeric lag values for one prediction hour.
///
/// `lag_1h` and `rolling_mean_3h` are only populated when the trained schema
/// asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagInputs {
    pub lag_24h: f64,
    pub lag_168h: f64,
    pub lag_1h: Option<f64>,
    pub rolling_mean_3h: Option<f64>,
    pub source: LagSource,
}

impl LagInputs {
    /// Lags read from a temporal buffer.
    pub fn buffered(lag_24h: f64, lag_168h: f64) -> Self {
        Self {
            lag_24h,
            lag_168h,
            lag_1h: None,
            rolling_mean_3h: None,
            source: LagSource::Buffer,
        }
    }

    /// Lags supplied by an external provider.
    pub fn external(lag_24h: f64, lag_168h: f64) -> Self {
        Self {
            source: LagSource::External,
            ..Self::buffered(lag_24h, lag_168h)
        }
    }

    pub fn with_lag_1h(mut self, lag_1h: f64) -> Self {
        self.lag_1h = Some(lag_1h);
        self
    }

    pub fn with_rolling_mean(mut self, mean: f64) -> Self {
        self.rolling_mean_3h = Some(mean);
        self
    }

    /// Every populated value, labelled by column name.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, f64)> {
        use super::columns::{LAG_168H, LAG_1H, LAG_24H, ROLL_3H};
        [
            Some((LAG_24H, self.lag_24h)),
            Some((LAG_168H, self.lag_168h)),
            self.lag_1h.map(|v| (LAG_1H, v)),
            self.rolling_mean_3h.map(|v| (ROLL_3H, v)),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_inputs() {
        let lags = LagInputs::buffered(10.0, 20.0);
        assert_eq!(lags.source, LagSource::Buffer);
        assert!(lags.lag_1h.is_none());
        assert_eq!(lags.values().count(), 2);
    }

    #[test]
    fn test_external_inputs_with_optional_lags() {
        let lags = LagInputs::external(10.0, 20.0)
            .with_lag_1h(5.0)
            .with_rolling_mean(6.0);
        assert_eq!(lags.source, LagSource::External);
        let values: Vec<_> = lags.values().collect();
        assert_eq!(
            values,
            vec![("lag_24h", 10.0), ("lag_168h", 20.0), ("lag_1h", 5.0), ("roll3h", 6.0)]
        );
    }

    #[test]
    fn test_source_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&LagSource::External).unwrap(), "\"external\"");
    }
}
