//! Data source configuration types.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use data_spi::{DataError, Result};
use serde::{Deserialize, Serialize};

/// City of Melbourne hourly pedestrian counts endpoint.
pub const DEFAULT_LIVE_API_URL: &str = "https://data.melbourne.vic.gov.au/api/explore/v2.1/catalog/datasets/pedestrian-counting-system-monthly-counts-per-hour/records";

/// Single-attempt timeout for one live lookup.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upper bound on live lookups in flight at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// One week of hourly readings.
pub const DEFAULT_SNAPSHOT_DEPTH: usize = 168;

/// Configuration for the live lag provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveApiConfig {
    /// Records endpoint queried with `sensing_date`, `hourday` and `sensor_name`
    pub base_url: String,
    /// Timeout applied to each request, in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests to the provider
    pub max_concurrent: usize,
}

impl Default for LiveApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LIVE_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl LiveApiConfig {
    /// Create a configuration for `base_url` with default limits.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for LiveApiConfig.
#[derive(Debug, Default)]
pub struct LiveApiConfigBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    max_concurrent: Option<usize>,
}

impl LiveApiConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint URL.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the concurrency bound.
    pub fn max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = Some(max);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<LiveApiConfig> {
        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(DataError::ConfigError(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        let max_concurrent = self.max_concurrent.unwrap_or(DEFAULT_MAX_CONCURRENT);
        if max_concurrent == 0 {
            return Err(DataError::ConfigError(
                "max_concurrent must be at least 1".to_string(),
            ));
        }
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_LIVE_API_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DataError::ConfigError(format!(
                "base_url must be an http(s) URL, got: {}",
                base_url
            )));
        }

        Ok(LiveApiConfig {
            base_url,
            timeout_secs,
            max_concurrent,
        })
    }
}

/// Configuration for the historical snapshot used to seed buffers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// CSV file with `Sensor_Name,Sensing_Date,HourDay,Total_of_Directions`
    pub path: PathBuf,
    /// Readings before this date are ignored when extracting a recent snapshot
    pub since: Option<NaiveDate>,
    /// Readings kept per sensor
    pub depth: usize,
}

impl SnapshotConfig {
    /// Create a snapshot configuration with the default one-week depth.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            since: None,
            depth: DEFAULT_SNAPSHOT_DEPTH,
        }
    }

    /// Ignore readings before `since`.
    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    /// Keep `depth` readings per sensor.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}
