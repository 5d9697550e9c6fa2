//! Data models for pedestrian counts.

mod live_lags;
mod reading;
mod time;

pub use live_lags::LiveLags;
pub use reading::SensorReading;
pub use time::{aest, floor_hour, localize, parse_timestamp, to_aest, AEST_OFFSET_SECS};
