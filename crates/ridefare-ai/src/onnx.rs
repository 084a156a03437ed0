//! ONNX Runtime regressor for price models exported from a training pipeline.
//!
//! Expects a single float input of shape `[batch, 11]` with columns in
//! [`FEATURE_NAMES`](ridefare_core::FEATURE_NAMES) order, and a single output
//! whose first element is the predicted price.

use std::path::Path;
use std::sync::Mutex;

use anyhow::anyhow;
use ort::session::Session;
use ort::value::Tensor;
use ridefare_core::{FEATURE_COUNT, FeatureVector};
use tracing::{debug, info};

use crate::ModelError;
use crate::model::PriceModel;

pub struct OnnxPriceModel {
    // Inference needs `&mut Session`; the lock lets a shared model serve `&self` callers.
    session: Mutex<Session>,
    input_name: String,
}

impl OnnxPriceModel {
    /// Load a regressor from an `.onnx` file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        anyhow::ensure!(path.exists(), "model not found at {path:?}");

        let session = Session::builder()?.commit_from_file(path)?;

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| anyhow!("model {path:?} declares no inputs"))?;
        if let Some(width) = infer_width(input.dtype())
            && width != FEATURE_COUNT
        {
            return Err(ModelError::InputWidth {
                expected: FEATURE_COUNT,
                found: width,
            }
            .into());
        }
        let input_name = input.name().to_string();

        info!(input = %input_name, model = %path.display(), "loaded ONNX price model");
        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }
}

impl PriceModel for OnnxPriceModel {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<f64> {
        let row: Vec<f32> = features.to_array().iter().map(|&v| v as f32).collect();
        let shape = [1i64, FEATURE_COUNT as i64];
        let input = Tensor::from_array((shape, row.into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("ONNX session lock poisoned"))?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input])?;

        let (output_shape, data) = outputs[0].try_extract_tensor::<f32>()?;
        debug!(shape = ?output_shape, "price model output");
        let price = data
            .first()
            .copied()
            .ok_or_else(|| anyhow!("price model returned an empty tensor"))?;
        Ok(f64::from(price))
    }
}

/// Try to infer the feature width from the model's input type.
fn infer_width(input_type: &ort::value::ValueType) -> Option<usize> {
    match input_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridefare_core::RideRequest;
    use std::path::PathBuf;

    fn require_model() -> PathBuf {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("model")
            .join("dp_price_model.onnx");
        if !path.exists() {
            panic!(
                "Model not found. Export the trained regressor to ONNX:\n  \
                 skl2onnx convert -> model/dp_price_model.onnx (input: float_input [None, 11])"
            );
        }
        path
    }

    #[test]
    fn load_model() {
        let path = require_model();
        assert!(OnnxPriceModel::load(&path).is_ok());
    }

    #[test]
    fn predicts_finite_positive_price() {
        let model = OnnxPriceModel::load(&require_model()).unwrap();
        let fv = FeatureVector::from_request(&RideRequest::default());
        let price = model.predict(&fv).unwrap();
        assert!(price.is_finite() && price > 0.0, "got {price}");
    }

    #[test]
    fn prediction_is_repeatable() {
        let model = OnnxPriceModel::load(&require_model()).unwrap();
        let fv = FeatureVector::from_request(&RideRequest::default());
        assert_eq!(model.predict(&fv).unwrap(), model.predict(&fv).unwrap());
    }
}
