//! Which optional features a trained model expects.

use serde::{Deserialize, Serialize};

use super::columns::{LAG_1H, ROLL_3H};

/// Optional inputs required by a trained scoring function.
///
/// `lag_24h` and `lag_168h` are always required. The two optional inputs are
/// fixed at training time; a serving path must supply exactly what the
/// artifact was trained on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub lag_1h: bool,
    pub rolling_mean_3h: bool,
}

impl FeatureSchema {
    /// Derive the schema from the column names a model was trained on.
    pub fn from_columns<'a>(columns: impl IntoIterator<Item = &'a str>) -> Self {
        let mut schema = Self::default();
        for column in columns {
            match column {
                LAG_1H => schema.lag_1h = true,
                ROLL_3H => schema.rolling_mean_3h = true,
                _ => {}
            }
        }
        schema
    }
}
