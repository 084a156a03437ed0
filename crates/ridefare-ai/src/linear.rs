//! Pure-Rust linear regressor loaded from a JSON artifact.
//!
//! The artifact names its input columns so a model fit on a different feature
//! layout is rejected at load time instead of silently mispricing:
//!
//! ```json
//! {
//!   "feature_names": ["Number_of_Riders", "...", "Peak_Time"],
//!   "coefficients": [0.42, "...", 12.0],
//!   "intercept": 35.8
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use ridefare_core::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::model::PriceModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Build a model over the standard feature layout.
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coefficients: coefficients.to_vec(),
            intercept,
        }
    }

    /// Parse and validate a JSON artifact.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let model: Self = serde_json::from_str(text).context("parsing linear model JSON")?;
        model.check()?;
        Ok(model)
    }

    /// Read, parse, and validate a JSON artifact from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read model at {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid model {}", path.display()))
    }

    fn check(&self) -> Result<(), ModelError> {
        if self.feature_names.len() != FEATURE_COUNT {
            return Err(ModelError::FeatureCount {
                expected: FEATURE_COUNT,
                found: self.feature_names.len(),
            });
        }
        if let Some((index, (found, &expected))) = self
            .feature_names
            .iter()
            .zip(FEATURE_NAMES.iter())
            .enumerate()
            .find(|(_, (found, expected))| found.as_str() != **expected)
        {
            return Err(ModelError::FeatureMismatch {
                index,
                expected,
                found: found.clone(),
            });
        }
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::CoefficientCount {
                expected: FEATURE_COUNT,
                found: self.coefficients.len(),
            });
        }
        Ok(())
    }
}

impl PriceModel for LinearModel {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<f64> {
        let dot: f64 = features
            .to_array()
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum();
        Ok(self.intercept + dot)
    }
}
