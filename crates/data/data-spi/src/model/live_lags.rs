//! Lag values fetched from a live provider.

use serde::{Deserialize, Serialize};

/// Same-hour-yesterday and same-hour-last-week counts for one prediction hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveLags {
    /// Count observed 24 hours before the prediction hour
    pub lag_24h: f64,
    /// Count observed 168 hours before the prediction hour
    pub lag_168h: f64,
}

impl LiveLags {
    pub fn new(lag_24h: f64, lag_168h: f64) -> Self {
        Self { lag_24h, lag_168h }
    }
}
