//! HTTP error mapping and startup errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use data_facade::DataError;
use forecast_facade::{ForecastError, ScoringError};
use serde::Serialize;
use thiserror::Error;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub detail: String,
}

/// Request-level failure, rendered as `{ "error": kind, "detail": message }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("{0}")]
    Internal(String),
}

impl From<ScoringError> for ApiError {
    fn from(e: ScoringError) -> Self {
        ApiError::Forecast(e.into())
    }
}

impl ApiError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Forecast(e) => match e {
                ForecastError::InvalidInput(_) => "invalid_input",
                ForecastError::UnknownSensor(_) => "unknown_sensor",
                ForecastError::InsufficientHistory { .. } => "insufficient_history",
                ForecastError::Scoring(_) => "scoring_error",
            },
            ApiError::Data(e) => match e {
                DataError::ApiError { .. } => "upstream_error",
                DataError::NoMatchingRecord { .. } => "no_matching_record",
                DataError::RequestFailed(_) => "provider_unavailable",
                DataError::ParseError(_) => "bad_upstream_response",
                DataError::InvalidDate(_) => "invalid_input",
                DataError::ConfigError(_) | DataError::SnapshotError(_) => "internal_error",
            },
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Forecast(e) => match e {
                ForecastError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                ForecastError::UnknownSensor(_) => StatusCode::NOT_FOUND,
                // A seeded sensor with a shallow snapshot is a serving-side problem.
                ForecastError::InsufficientHistory { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                ForecastError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Data(e) => match e {
                DataError::ApiError { status, .. } => StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                DataError::NoMatchingRecord { .. } => StatusCode::NOT_FOUND,
                DataError::RequestFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
                DataError::ParseError(_) => StatusCode::BAD_GATEWAY,
                DataError::InvalidDate(_) => StatusCode::BAD_REQUEST,
                DataError::ConfigError(_) | DataError::SnapshotError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(kind = self.kind(), status = status.as_u16(), "{}", self);
        }
        let body = ErrorResponse {
            error: self.kind(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Failure while configuring or starting the service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Model error: {0}")]
    Model(#[from] ScoringError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
