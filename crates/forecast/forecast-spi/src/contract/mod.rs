//! Contract traits for forecasting
//!
//! - [`Scorer`]: single-step scoring of one feature vector

mod scorer;

pub use scorer::Scorer;
