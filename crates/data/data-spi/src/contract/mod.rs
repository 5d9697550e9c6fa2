//! Contract traits for data sources.

mod lag_provider;

pub use lag_provider::LagProvider;
