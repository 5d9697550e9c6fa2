//! # server
//!
//! Pedestrian count forecasting service. Seeds the buffer store from a
//! snapshot, loads the model bundle and serves forecasts over HTTP.

use std::sync::Arc;

use data_facade::{load_snapshot, CityApiClient};
use forecast_facade::{BufferStore, FeatureEncoder, Forecaster, ModelBundle, Scorer};
use server::{AppState, ServerConfig, StartupError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let addr = config.addr()?;

    let readings = load_snapshot(&config.snapshot_path)?;
    let store = BufferStore::from_snapshot(config.forecast.buffer_capacity, &readings);

    let bundle = ModelBundle::load(&config.model_path)?;
    tracing::info!(model = bundle.name(), sensors = store.len(), "model and history ready");
    let forecaster = Forecaster::new(FeatureEncoder::victoria(), Arc::new(bundle));

    let provider = CityApiClient::new(&config.live_api)?;
    tracing::info!(url = provider.base_url(), "live lag provider configured");

    let state = AppState::new(store, forecaster, Arc::new(provider), config.forecast.clone())
        .with_snapshot_path(config.snapshot_path.clone());
    let app = server::app(state);

    tracing::info!("server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
