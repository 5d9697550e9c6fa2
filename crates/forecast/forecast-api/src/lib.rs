//! Forecast Consumer API
//!
//! Configuration types and builders for the forecasting engine.

use forecast_spi::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// One week of hourly history.
pub const DEFAULT_BUFFER_CAPACITY: usize = 168;

/// Horizon used when a request does not name one.
pub const DEFAULT_HOURS: usize = 24;

/// Longest horizon a single request may ask for.
pub const DEFAULT_MAX_HOURS: usize = 720;

/// Configuration for the forecasting engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Horizon used when the caller gives none
    pub default_hours: usize,
    /// Upper bound on a requested horizon
    pub max_hours: usize,
    /// Hourly readings retained per sensor buffer
    pub buffer_capacity: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_hours: DEFAULT_HOURS,
            max_hours: DEFAULT_MAX_HOURS,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ForecastConfig {
    /// Resolve a requested horizon, applying the default and the bounds.
    pub fn resolve_hours(&self, requested: Option<usize>) -> Result<usize> {
        let hours = requested.unwrap_or(self.default_hours);
        if hours == 0 || hours > self.max_hours {
            return Err(ForecastError::InvalidInput(format!(
                "hours must be between 1 and {}, got {}",
                self.max_hours, hours
            )));
        }
        Ok(hours)
    }
}

/// Builder for ForecastConfig
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    default_hours: Option<usize>,
    max_hours: Option<usize>,
    buffer_capacity: Option<usize>,
}

impl ForecastConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_hours(mut self, hours: usize) -> Self {
        self.default_hours = Some(hours);
        self
    }

    pub fn max_hours(mut self, hours: usize) -> Self {
        self.max_hours = Some(hours);
        self
    }

    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<ForecastConfig> {
        let config = ForecastConfig {
            default_hours: self.default_hours.unwrap_or(DEFAULT_HOURS),
            max_hours: self.max_hours.unwrap_or(DEFAULT_MAX_HOURS),
            buffer_capacity: self.buffer_capacity.unwrap_or(DEFAULT_BUFFER_CAPACITY),
        };

        if config.max_hours == 0 {
            return Err(ForecastError::InvalidInput(
                "max_hours must be at least 1".to_string(),
            ));
        }
        if config.default_hours == 0 || config.default_hours > config.max_hours {
            return Err(ForecastError::InvalidInput(format!(
                "default_hours must be between 1 and {}",
                config.max_hours
            )));
        }
        // The deepest lag the encoder reads is one week back.
        if config.buffer_capacity < DEFAULT_BUFFER_CAPACITY {
            return Err(ForecastError::InvalidInput(format!(
                "buffer_capacity must be at least {}",
                DEFAULT_BUFFER_CAPACITY
            )));
        }
        Ok(config)
    }
}
