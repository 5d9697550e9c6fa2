//! API route handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, FixedOffset, Utc};
use data_facade::fetch_live_lags;
use forecast_facade::Prediction;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::params::{parse_hours, required_sensor, resolve_hour};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub sensor: Option<String>,
    pub hours: Option<String>,
    pub start: Option<String>,
}

/// One forecast hour in a `/predict` response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HourlyCount {
    pub timestamp: DateTime<FixedOffset>,
    pub count: u64,
}

impl From<&Prediction> for HourlyCount {
    fn from(p: &Prediction) -> Self {
        Self {
            timestamp: p.timestamp,
            count: p.count(),
        }
    }
}

/// Recursive forecast from the seeded history.
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
) -> Result<Json<Vec<HourlyCount>>, ApiError> {
    let sensor = required_sensor(query.sensor)?;
    let hours = state
        .forecast
        .resolve_hours(parse_hours(query.hours.as_deref())?)?;
    let start = resolve_hour(query.start.as_deref(), Utc::now())?;

    // Read lock is released at the end of this statement.
    let buffer = state.store.read().await.clone_for(&sensor)?;

    let forecaster = state.forecaster.clone();
    let predictions = tokio::task::spawn_blocking(move || {
        forecaster.forecast(&sensor, &start, hours, buffer)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("forecast task failed: {}", e)))??;

    tracing::debug!(hours, %start, "served recursive forecast");
    Ok(Json(predictions.iter().map(HourlyCount::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    pub sensor: Option<String>,
    pub at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LivePrediction {
    pub sensor_name: String,
    pub timestamp: DateTime<FixedOffset>,
    pub predicted_count: u64,
}

/// Single-hour prediction from live provider lags.
pub async fn predict_live(
    State(state): State<AppState>,
    Query(query): Query<LiveQuery>,
) -> Result<Json<LivePrediction>, ApiError> {
    let sensor = required_sensor(query.sensor)?;
    let at = resolve_hour(query.at.as_deref(), Utc::now())?;

    let lags = fetch_live_lags(state.provider.as_ref(), &sensor, at).await?;
    let prediction = state.forecaster.predict_live(&sensor, &at, &lags)?;

    tracing::debug!(
        sensor = %sensor,
        %at,
        lag_24h = lags.lag_24h,
        lag_168h = lags.lag_168h,
        "served live prediction"
    );
    Ok(Json(LivePrediction {
        sensor_name: sensor,
        timestamp: prediction.timestamp,
        predicted_count: prediction.count(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SensorInfo {
    pub sensor: String,
    pub depth: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SensorsResponse {
    pub count: usize,
    pub capacity: usize,
    pub sensors: Vec<SensorInfo>,
}

/// Seeded sensors and how many hours each holds.
pub async fn sensors(State(state): State<AppState>) -> Json<SensorsResponse> {
    let store = state.store.read().await;
    let sensors: Vec<SensorInfo> = store
        .sensors()
        .into_iter()
        .map(|name| SensorInfo {
            sensor: name.to_string(),
            depth: store.depth(name).unwrap_or(0),
        })
        .collect();

    Json(SensorsResponse {
        count: sensors.len(),
        capacity: store.capacity(),
        sensors,
    })
}

/// Re-read the snapshot and swap the store.
pub async fn reload_snapshot(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sensors = state.reload().await?;
    Ok(Json(serde_json::json!({
        "status": "reloaded",
        "sensors": sensors
    })))
}

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - is a model loaded and the store seeded?
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let sensors = state.store.read().await.len();
    let ready = sensors > 0;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "version": env!("CARGO_PKG_VERSION"),
            "model": state.forecaster.scorer().name(),
            "sensors": sensors
        })),
    )
}
