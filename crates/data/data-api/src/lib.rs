//! Data Source API
//!
//! Configuration types and builders for the live lag provider and the
//! historical snapshot.

pub mod config;

pub use config::{
    LiveApiConfig, LiveApiConfigBuilder, SnapshotConfig, DEFAULT_LIVE_API_URL,
    DEFAULT_MAX_CONCURRENT, DEFAULT_SNAPSHOT_DEPTH, DEFAULT_TIMEOUT_SECS,
};
