//! Data Source Service Provider Interface
//!
//! Defines traits and types for reading hourly pedestrian counts, either from
//! a historical snapshot or from a live upstream provider.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::LagProvider;
pub use error::{DataError, Result};
pub use model::{
    aest, floor_hour, localize, parse_timestamp, to_aest, LiveLags, SensorReading,
    AEST_OFFSET_SECS,
};
