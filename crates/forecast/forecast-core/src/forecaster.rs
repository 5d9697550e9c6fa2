//! Recursive multi-step and live single-hour forecasting.

use std::iter::FusedIterator;
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use data_spi::{to_aest, LiveLags};
use forecast_spi::{
    columns, FeatureSchema, FeatureVector, ForecastError, LagInputs, Prediction, Result, Scorer,
    ScoringError,
};

use crate::buffer::TemporalBuffer;
use crate::encoder::FeatureEncoder;

/// Hours averaged for the short rolling mean.
const ROLLING_WINDOW: usize = 3;

/// Pairs a scorer with the feature encoder.
#[derive(Clone)]
pub struct Forecaster {
    encoder: FeatureEncoder,
    scorer: Arc<dyn Scorer>,
}

impl std::fmt::Debug for Forecaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forecaster")
            .field("scorer", &self.scorer.name())
            .field("schema", &self.scorer.schema())
            .finish()
    }
}

impl Forecaster {
    pub fn new(encoder: FeatureEncoder, scorer: Arc<dyn Scorer>) -> Self {
        Self { encoder, scorer }
    }

    pub fn scorer(&self) -> &dyn Scorer {
        self.scorer.as_ref()
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Lazily forecast `hours` consecutive hours from `start`.
    ///
    /// Each prediction is appended to the iterator's own buffer before the
    /// next hour is encoded. The iterator stops after the first error.
    pub fn steps<Tz: TimeZone>(
        &self,
        sensor: &str,
        start: &DateTime<Tz>,
        hours: usize,
        buffer: TemporalBuffer,
    ) -> RecursiveForecast<'_> {
        RecursiveForecast {
            forecaster: self,
            sensor: sensor.to_string(),
            next: Some(to_aest(start)),
            remaining: hours,
            buffer,
            failed: false,
        }
    }

    /// Forecast `hours` consecutive hours from `start`, all or nothing.
    pub fn forecast<Tz: TimeZone>(
        &self,
        sensor: &str,
        start: &DateTime<Tz>,
        hours: usize,
        buffer: TemporalBuffer,
    ) -> Result<Vec<Prediction>> {
        let predictions = self
            .steps(sensor, start, hours, buffer)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            sensor,
            hours,
            model = self.scorer.name(),
            "recursive forecast complete"
        );
        Ok(predictions)
    }

    /// Predict a single hour from externally supplied lags.
    ///
    /// Only the 24h and 168h lags are available here, so a model trained on
    /// `lag_1h` or `roll3h` is rejected before scoring.
    pub fn predict_live<Tz: TimeZone>(
        &self,
        sensor: &str,
        timestamp: &DateTime<Tz>,
        lags: &LiveLags,
    ) -> Result<Prediction> {
        let schema = self.scorer.schema();
        if let Some(column) = unsupported_live_column(&schema) {
            return Err(ScoringError::SchemaMismatch {
                column: column.to_string(),
            }
            .into());
        }

        let ts = to_aest(timestamp);
        let inputs = LagInputs::external(lags.lag_24h, lags.lag_168h);
        let features = self.encoder.encode(sensor, &ts, &inputs)?;
        let value = self.score(&features)?;
        Ok(Prediction::new(ts, value))
    }

    /// One recursive step: read lags from `buffer`, encode, score, clamp.
    fn step(
        &self,
        sensor: &str,
        timestamp: &DateTime<FixedOffset>,
        buffer: &TemporalBuffer,
    ) -> Result<f64> {
        let schema = self.scorer.schema();
        let mut inputs = LagInputs::buffered(buffer.lag_at(24)?, buffer.lag_at(168)?);
        if schema.lag_1h {
            inputs = inputs.with_lag_1h(buffer.lag_at(1)?);
        }
        if schema.rolling_mean_3h {
            inputs = inputs.with_rolling_mean(buffer.rolling_mean(ROLLING_WINDOW)?);
        }
        let features = self.encoder.encode(sensor, timestamp, &inputs)?;
        self.score(&features)
    }

    fn score(&self, features: &FeatureVector) -> Result<f64> {
        let raw = self.scorer.score(features)?;
        if !raw.is_finite() {
            return Err(ScoringError::NonFiniteOutput(raw).into());
        }
        Ok(raw.max(0.0))
    }
}

fn unsupported_live_column(schema: &FeatureSchema) -> Option<&'static str> {
    if schema.lag_1h {
        Some(columns::LAG_1H)
    } else if schema.rolling_mean_3h {
        Some(columns::ROLL_3H)
    } else {
        None
    }
}

/// Iterator over recursive predictions. Owns its working buffer.
#[derive(Debug)]
pub struct RecursiveForecast<'a> {
    forecaster: &'a Forecaster,
    sensor: String,
    // None once the hour after the last prediction is unrepresentable.
    next: Option<DateTime<FixedOffset>>,
    remaining: usize,
    buffer: TemporalBuffer,
    failed: bool,
}

impl RecursiveForecast<'_> {
    /// Working buffer, including predictions made so far.
    pub fn buffer(&self) -> &TemporalBuffer {
        &self.buffer
    }
}

impl Iterator for RecursiveForecast<'_> {
    type Item = Result<Prediction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.failed {
            return None;
        }
        let result = match self.next {
            Some(timestamp) => self
                .forecaster
                .step(&self.sensor, &timestamp, &self.buffer)
                .map(|value| (timestamp, value)),
            None => Err(ForecastError::InvalidInput(format!(
                "{} forecast hours run past the supported date range",
                self.remaining
            ))),
        };
        match result {
            Ok((timestamp, value)) => {
                self.buffer.append(value);
                self.next = timestamp.checked_add_signed(Duration::hours(1));
                self.remaining -= 1;
                Some(Ok(Prediction::new(timestamp, value)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.remaining))
        }
    }
}

impl FusedIterator for RecursiveForecast<'_> {}
