//! # server
//!
//! REST API for recursive and live pedestrian count forecasts.

pub mod config;
pub mod error;
pub mod params;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, StartupError};
pub use state::AppState;

/// Build the router with middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .route("/health", get(routes::liveness))
        // Forecast endpoints
        .route("/predict", get(routes::predict))
        .route("/predict/live", get(routes::predict_live))
        .route("/sensors", get(routes::sensors))
        .route("/snapshot/reload", post(routes::reload_snapshot))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
