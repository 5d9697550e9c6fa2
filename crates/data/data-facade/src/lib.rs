//! Data Source Facade
//!
//! Unified re-exports for the data module.
//!
//! This facade provides a single entry point for all data source functionality:
//! - `data_spi` - Traits, types, and errors for data sources
//! - `data_api` - Configuration types and builders
//! - `data_core` - Implementations (CSV snapshot, City of Melbourne live API)
//!
//! # Example
//!
//! ```rust,ignore
//! use data_facade::{fetch_live_lags, CityApiClient, LiveApiConfig, aest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = CityApiClient::new(&LiveApiConfig::default()).unwrap();
//!     let now = chrono::Utc::now().with_timezone(&aest());
//!     let lags = fetch_live_lags(&client, "Flinders St", now).await.unwrap();
//!     println!("{:?}", lags);
//! }
//! ```

// Re-export everything from SPI
pub use data_spi::*;

// Re-export everything from API
pub use data_api::*;

// Re-export everything from Core
pub use data_core::*;
