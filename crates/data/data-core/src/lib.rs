//! Data Source Core
//!
//! Implementations for data sources: the CSV snapshot used to seed buffers
//! and the live lag provider.

pub mod live;
pub mod snapshot;

#[cfg(feature = "fetch")]
pub mod city_api;

pub use live::fetch_live_lags;
pub use snapshot::{load_snapshot, read_snapshot, recent_snapshot, write_snapshot};

#[cfg(feature = "fetch")]
pub use city_api::CityApiClient;
