//! Gradient-boosted tree scoring
//!
//! A model bundle is one JSON document holding the fitted preprocessing
//! transform and the tree ensemble exported from XGBoost:
//!
//! ```json
//! {
//!   "name": "pedcast-gbm",
//!   "preprocessor": {
//!     "numeric": [{"name": "lag_24h", "mean": 410.2, "scale": 380.9}],
//!     "categorical": [{"name": "day_of_week", "categories": ["Friday", "Monday"]}]
//!   },
//!   "booster": {
//!     "base_score": 0.5,
//!     "trees": [{"nodeid": 0, "split": "f0", "split_condition": 0.1,
//!                "yes": 1, "no": 2, "missing": 1,
//!                "children": [{"nodeid": 1, "leaf": -2.0}, {"nodeid": 2, "leaf": 3.5}]}]
//!   }
//! }
//! ```
//!
//! The preprocessor's column list is authoritative: it determines which
//! optional lags the model needs.

mod booster;
mod bundle;
mod preprocess;

pub use booster::{Booster, BoosterDump, TreeNode};
pub use bundle::ModelBundle;
pub use preprocess::{CategoricalColumn, NumericColumn, Preprocessor};
