//! Model bundle loading and the [`Scorer`] implementation.

use std::fs;
use std::path::Path;

use forecast_spi::{columns, FeatureSchema, FeatureVector, Scorer, ScoringError};
use serde::Deserialize;

use super::booster::{Booster, BoosterDump};
use super::preprocess::Preprocessor;

fn default_name() -> String {
    "pedcast-gbm".to_string()
}

#[derive(Debug, Deserialize)]
struct BundleFile {
    #[serde(default = "default_name")]
    name: String,
    preprocessor: Preprocessor,
    booster: BoosterDump,
}

/// Fitted preprocessor plus compiled tree ensemble.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    name: String,
    preprocessor: Preprocessor,
    booster: Booster,
    schema: FeatureSchema,
}

impl ModelBundle {
    /// Validate and compile parts into a bundle.
    pub fn new(
        name: impl Into<String>,
        preprocessor: Preprocessor,
        booster: &BoosterDump,
    ) -> Result<Self, ScoringError> {
        preprocessor.validate()?;
        for required in [columns::LAG_24H, columns::LAG_168H] {
            if !preprocessor.columns().any(|c| c == required) {
                return Err(ScoringError::InvalidArtifact(format!(
                    "preprocessor lacks required column '{}'",
                    required
                )));
            }
        }
        let booster = Booster::compile(booster, preprocessor.width())?;
        let schema = FeatureSchema::from_columns(preprocessor.columns());

        Ok(Self {
            name: name.into(),
            preprocessor,
            booster,
            schema,
        })
    }

    /// Parse a bundle from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ScoringError> {
        let file: BundleFile = serde_json::from_str(json)
            .map_err(|e| ScoringError::InvalidArtifact(e.to_string()))?;
        Self::new(file.name, file.preprocessor, &file.booster)
    }

    /// Load a bundle from disk.
    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let json = fs::read_to_string(path).map_err(|e| {
            ScoringError::InvalidArtifact(format!("cannot read {}: {}", path.display(), e))
        })?;
        let bundle = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            model = %bundle.name,
            trees = bundle.booster.n_trees(),
            inputs = bundle.preprocessor.width(),
            lag_1h = bundle.schema.lag_1h,
            roll3h = bundle.schema.rolling_mean_3h,
            "loaded model bundle"
        );
        Ok(bundle)
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn booster(&self) -> &Booster {
        &self.booster
    }
}

impl Scorer for ModelBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> FeatureSchema {
        self.schema
    }

    fn score(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        let row = self.preprocessor.transform(features)?;
        let value = self.booster.predict(&row);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ScoringError::NonFiniteOutput(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_spi::LagSource;

    /// lag_168h standardised around 100, one split on it, plus a holiday bump.
    const BUNDLE: &str = r#"{
        "name": "unit",
        "preprocessor": {
            "numeric": [
                {"name": "lag_24h", "mean": 0.0, "scale": 1.0},
                {"name": "lag_168h", "mean": 100.0, "scale": 10.0}
            ],
            "categorical": [
                {"name": "is_holiday", "categories": ["0", "1"]}
            ]
        },
        "booster": {
            "base_score": 0.0,
            "trees": [
                {"nodeid": 0, "split": "f1", "split_condition": 0.0, "yes": 1, "no": 2, "missing": 1,
                 "children": [{"nodeid": 1, "leaf": -50.0}, {"nodeid": 2, "leaf": 200.0}]},
                {"nodeid": 0, "split": "f3", "split_condition": 0.5, "yes": 1, "no": 2, "missing": 1,
                 "children": [{"nodeid": 1, "leaf": 0.0}, {"nodeid": 2, "leaf": 25.0}]}
            ]
        }
    }"#;

    fn features(lag_168h: f64, is_holiday: bool) -> FeatureVector {
        FeatureVector {
            sensor: "A".to_string(),
            hour_of_day: 12,
            lag_24h: 10.0,
            lag_168h,
            lag_1h: None,
            rolling_mean_3h: None,
            is_holiday,
            is_lockdown: false,
            day_of_week: "Tuesday".to_string(),
            source: LagSource::Buffer,
        }
    }

    #[test]
    fn test_from_json_and_score() {
        let bundle = ModelBundle::from_json(BUNDLE).unwrap();
        assert_eq!(bundle.name(), "unit");
        assert_eq!(bundle.schema(), FeatureSchema::default());
        assert_eq!(bundle.score(&features(150.0, false)).unwrap(), 200.0);
        assert_eq!(bundle.score(&features(150.0, true)).unwrap(), 225.0);
        // Negative raw scores are returned unclamped.
        assert_eq!(bundle.score(&features(50.0, false)).unwrap(), -50.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let bundle = ModelBundle::from_json(BUNDLE).unwrap();
        let fv = features(123.0, true);
        assert_eq!(bundle.score(&fv).unwrap(), bundle.score(&fv).unwrap());
    }

    #[test]
    fn test_schema_follows_columns() {
        let json = BUNDLE.replace(
            r#"{"name": "lag_24h", "mean": 0.0, "scale": 1.0},"#,
            r#"{"name": "lag_24h", "mean": 0.0, "scale": 1.0},
               {"name": "lag_1h", "mean": 0.0, "scale": 1.0},"#,
        );
        let json = json.replace("\"f3\"", "\"f4\"");
        let bundle = ModelBundle::from_json(&json).unwrap();
        assert!(bundle.schema().lag_1h);
        assert!(!bundle.schema().rolling_mean_3h);
        assert!(matches!(
            bundle.score(&features(100.0, false)),
            Err(ScoringError::SchemaMismatch { column }) if column == "lag_1h"
        ));
    }

    #[test]
    fn test_missing_required_lag_rejected() {
        let json = BUNDLE.replace("lag_24h", "HourDay");
        assert!(matches!(
            ModelBundle::from_json(&json),
            Err(ScoringError::InvalidArtifact(msg)) if msg.contains("lag_24h")
        ));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            ModelBundle::from_json("{\"preprocessor\": 1}"),
            Err(ScoringError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ModelBundle::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidArtifact(msg) if msg.contains("cannot read")));
    }
}
