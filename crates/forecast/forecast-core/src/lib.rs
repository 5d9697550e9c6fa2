//! Forecast Core
//!
//! Calendar flags, feature encoding, per-sensor history buffers, the
//! recursive forecaster and the gradient-boosted tree scorer.

pub mod buffer;
pub mod calendar;
pub mod encoder;
pub mod forecaster;
pub mod scoring;
pub mod store;

// Re-export SPI types used alongside the implementations
pub use forecast_spi::{ForecastError, Prediction, Result, Scorer, ScoringError};

// Re-export main types
pub use buffer::TemporalBuffer;
pub use calendar::{easter_sunday, Calendar};
pub use encoder::FeatureEncoder;
pub use forecaster::{Forecaster, RecursiveForecast};
pub use scoring::ModelBundle;
pub use store::BufferStore;
