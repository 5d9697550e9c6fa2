//! Fitted preprocessing: standard scaling then one-hot encoding.

use std::collections::HashSet;

use forecast_spi::{FeatureVector, ScoringError};
use serde::{Deserialize, Serialize};

/// Standard-scaled numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
}

impl NumericColumn {
    fn transform(&self, value: f64) -> f64 {
        // A constant training column has zero variance.
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        (value - self.mean) / scale
    }
}

/// One-hot encoded categorical column. Unseen values encode as all zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
}

/// Column transformer applied before the booster.
///
/// Output layout is every numeric column in order, followed by the one-hot
/// block of every categorical column in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

impl Preprocessor {
    /// Number of model inputs produced per row.
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    /// Trained input column names.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.categorical.iter().map(|c| c.name.as_str()))
    }

    /// Check the fitted parameters are usable.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let mut seen = HashSet::new();
        for name in self.columns() {
            if !seen.insert(name) {
                return Err(ScoringError::InvalidArtifact(format!(
                    "column '{}' appears twice",
                    name
                )));
            }
        }
        for column in &self.numeric {
            if !column.mean.is_finite() || !column.scale.is_finite() {
                return Err(ScoringError::InvalidArtifact(format!(
                    "column '{}' has non-finite scaling parameters",
                    column.name
                )));
            }
        }
        if self.width() == 0 {
            return Err(ScoringError::InvalidArtifact(
                "preprocessor produces no inputs".to_string(),
            ));
        }
        Ok(())
    }

    /// Transform one feature vector into model inputs.
    pub fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>, ScoringError> {
        let mut row = Vec::with_capacity(self.width());

        for column in &self.numeric {
            let value = features
                .numeric(&column.name)
                .ok_or_else(|| ScoringError::SchemaMismatch {
                    column: column.name.clone(),
                })?;
            row.push(column.transform(value));
        }

        for column in &self.categorical {
            let value = features
                .categorical(&column.name)
                .ok_or_else(|| ScoringError::SchemaMismatch {
                    column: column.name.clone(),
                })?;
            row.extend(
                column
                    .categories
                    .iter()
                    .map(|category| if *category == value { 1.0 } else { 0.0 }),
            );
        }

        Ok(row)
    }
}
