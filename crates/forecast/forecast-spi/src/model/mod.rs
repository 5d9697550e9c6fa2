//! Feature and prediction models.

pub mod columns;
mod feature_vector;
mod lag_inputs;
mod prediction;
mod schema;

pub use feature_vector::FeatureVector;
pub use lag_inputs::{LagInputs, LagSource};
pub use prediction::Prediction;
pub use schema::FeatureSchema;
