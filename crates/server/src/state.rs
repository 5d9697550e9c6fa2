//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use data_facade::{load_snapshot, DataError, LagProvider};
use forecast_facade::{BufferStore, ForecastConfig, Forecaster};
use tokio::sync::RwLock;

use crate::error::ApiError;

/// Handles passed to every request handler.
///
/// The buffer store sits behind a single-writer lock: handlers take a read
/// lock only long enough to clone one sensor's buffer, and a reload builds
/// the replacement store before swapping it in whole.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<BufferStore>>,
    pub forecaster: Arc<Forecaster>,
    pub provider: Arc<dyn LagProvider>,
    pub forecast: ForecastConfig,
    pub snapshot_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        store: BufferStore,
        forecaster: Forecaster,
        provider: Arc<dyn LagProvider>,
        forecast: ForecastConfig,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            forecaster: Arc::new(forecaster),
            provider,
            forecast,
            snapshot_path: None,
        }
    }

    /// Snapshot file re-read by [`AppState::reload`].
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Re-read the snapshot and replace the store. Returns the sensor count.
    pub async fn reload(&self) -> Result<usize, ApiError> {
        let path = self.snapshot_path.clone().ok_or_else(|| {
            DataError::ConfigError("no snapshot path configured".to_string())
        })?;
        let capacity = self.forecast.buffer_capacity;

        let fresh = tokio::task::spawn_blocking(move || {
            load_snapshot(&path).map(|rows| BufferStore::from_snapshot(capacity, &rows))
        })
        .await
        .map_err(|e| ApiError::Internal(format!("snapshot reload task failed: {}", e)))??;

        let sensors = fresh.len();
        *self.store.write().await = fresh;
        tracing::info!(sensors, "buffer store reloaded");
        Ok(sensors)
    }
}
