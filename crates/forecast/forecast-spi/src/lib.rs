//! Forecast Service Provider Interface
//!
//! Defines the scoring contract, the fixed feature schema and the error
//! taxonomy shared by the recursive and live forecasting paths.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::Scorer;
pub use error::{ForecastError, Result, ScoringError};
pub use model::{columns, FeatureSchema, FeatureVector, LagInputs, LagSource, Prediction};
