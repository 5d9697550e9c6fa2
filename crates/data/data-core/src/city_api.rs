//! City of Melbourne live count fetcher
//!
//! Looks up a single sensor-hour from the City of Melbourne open data
//! records API.
//!
//! # Example
//!
//! ```rust,no_run
//! use data_api::LiveApiConfig;
//! use data_core::CityApiClient;
//! use data_spi::{aest, LagProvider};
//! use chrono::TimeZone;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = CityApiClient::new(&LiveApiConfig::default()).unwrap();
//!     let ts = aest().with_ymd_and_hms(2025, 4, 10, 8, 0, 0).unwrap();
//!     let count = client.count_at("Flinders Street Station Underpass", ts).await.unwrap();
//!     println!("{} pedestrians", count);
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Timelike};
use data_api::LiveApiConfig;
use data_spi::{to_aest, DataError, LagProvider, Result};
use serde::Deserialize;
use tokio::sync::Semaphore;

/// Records API response structures
#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    total_count: Option<u64>,
    results: Vec<CountRecord>,
}

#[derive(Debug, Deserialize)]
struct CountRecord {
    total_of_directions: Option<f64>,
}

/// Longest upstream error body echoed back in [`DataError::ApiError`].
const MAX_DETAIL_LEN: usize = 200;

/// City of Melbourne records API client.
///
/// Every call is a single attempt bounded by the configured timeout; the
/// client never retries. Concurrent calls through one client (and its clones)
/// share a semaphore sized by `max_concurrent`.
#[derive(Debug, Clone)]
pub struct CityApiClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

impl CityApiClient {
    /// Create a client from configuration.
    pub fn new(config: &LiveApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("pedcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::ConfigError(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            client,
            permits: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Endpoint this client queries.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the record filter for one sensor-hour.
    fn build_query(sensor: &str, timestamp: &DateTime<FixedOffset>) -> Vec<(&'static str, String)> {
        let local = to_aest(timestamp);
        let escaped = sensor.replace('\\', "\\\\").replace('"', "\\\"");
        vec![
            (
                "where",
                format!(
                    "sensor_name=\"{}\" AND sensing_date=date'{}' AND hourday={}",
                    escaped,
                    local.date_naive().format("%Y-%m-%d"),
                    local.hour()
                ),
            ),
            // Two rows are enough to tell "exactly one" from "several".
            ("limit", "2".to_string()),
        ]
    }

    /// Turn a successful response body into exactly one count.
    fn parse_response(
        json: &str,
        sensor: &str,
        timestamp: &DateTime<FixedOffset>,
    ) -> Result<f64> {
        let response: RecordsResponse =
            serde_json::from_str(json).map_err(|e| DataError::ParseError(e.to_string()))?;

        let local = to_aest(timestamp);
        let matched = response
            .total_count
            .map(|n| n as usize)
            .unwrap_or(response.results.len());

        match (matched, response.results.first()) {
            (0, _) => Err(DataError::NoMatchingRecord {
                sensor: sensor.to_string(),
                date: local.date_naive().format("%Y-%m-%d").to_string(),
                hour: local.hour(),
            }),
            (n, None) => Err(DataError::ParseError(format!(
                "total_count is {} but results is empty",
                n
            ))),
            (1, Some(record)) => match record.total_of_directions {
                Some(count) if count.is_finite() && count >= 0.0 => Ok(count),
                Some(count) => Err(DataError::ParseError(format!(
                    "total_of_directions is not a valid count: {}",
                    count
                ))),
                None => Err(DataError::ParseError(
                    "record has no total_of_directions".to_string(),
                )),
            },
            (n, Some(_)) => Err(DataError::ParseError(format!(
                "expected exactly one record, got {}",
                n
            ))),
        }
    }

    /// Wait for a permit, then make the single request.
    async fn fetch(
        &self,
        query: &[(&'static str, String)],
    ) -> Result<(reqwest::StatusCode, String)> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| DataError::RequestFailed(e.to_string()))?;

        let response = self
            .client
            .get(&self.base_url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.request_error(e))?;
        Ok((status, text))
    }

    fn request_error(&self, e: reqwest::Error) -> DataError {
        if e.is_timeout() {
            self.timed_out()
        } else {
            DataError::RequestFailed(e.to_string())
        }
    }

    fn timed_out(&self) -> DataError {
        DataError::RequestFailed(format!("timed out after {}s", self.timeout.as_secs()))
    }
}

#[async_trait]
impl LagProvider for CityApiClient {
    fn name(&self) -> &str {
        "city-of-melbourne"
    }

    async fn count_at(&self, sensor: &str, timestamp: DateTime<FixedOffset>) -> Result<f64> {
        let query = Self::build_query(sensor, &timestamp);
        tracing::debug!(sensor, %timestamp, "live lag lookup");

        // The deadline covers queueing for a permit as well as the request.
        let (status, text) = tokio::time::timeout(self.timeout, self.fetch(&query))
            .await
            .map_err(|_| self.timed_out())??;

        if !status.is_success() {
            let detail: String = text.chars().take(MAX_DETAIL_LEN).collect();
            tracing::warn!(sensor, status = status.as_u16(), "live provider rejected lookup");
            return Err(DataError::ApiError {
                status: status.as_u16(),
                detail,
            });
        }

        Self::parse_response(&text, sensor, &timestamp)
    }
}
