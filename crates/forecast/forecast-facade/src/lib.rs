//! Forecast Facade
//!
//! High-level API for recursive pedestrian count forecasting. Re-exports all
//! public types from the forecast stack for convenient usage.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use forecast_facade::{BufferStore, FeatureEncoder, Forecaster, ModelBundle};
//!
//! let bundle = ModelBundle::load("model.json".as_ref())?;
//! let store = BufferStore::from_snapshot(168, &readings);
//! let forecaster = Forecaster::new(FeatureEncoder::victoria(), Arc::new(bundle));
//! let predictions = forecaster.forecast("Flinders St", &start, 24, store.clone_for("Flinders St")?)?;
//! ```

// Re-export SPI contracts and models
pub use forecast_spi::*;

// Re-export configuration
pub use forecast_api::*;

// Re-export core modules for direct access
pub use forecast_core::{buffer, calendar, encoder, forecaster, scoring, store};

// Re-export main types at root
pub use forecast_core::{
    easter_sunday, BufferStore, Calendar, FeatureEncoder, Forecaster, ModelBundle,
    RecursiveForecast, TemporalBuffer,
};
