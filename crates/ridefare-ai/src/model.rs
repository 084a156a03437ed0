use std::path::Path;

use ridefare_core::FeatureVector;
use tracing::info;

use crate::ModelError;
use crate::linear::LinearModel;

/// A trained regressor that turns encoded ride features into a fare.
///
/// Implementations are loaded once and only read afterwards, so `predict`
/// takes `&self` and the trait requires `Send + Sync` for process-wide sharing.
pub trait PriceModel: Send + Sync {
    /// Predict the final (surge-inclusive) price for one ride.
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<f64>;
}

impl<M: PriceModel + ?Sized> PriceModel for Box<M> {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<f64> {
        (**self).predict(features)
    }
}

/// Load a price model artifact, choosing the loader by file extension.
///
/// `.json` loads a [`LinearModel`]; `.onnx` loads an ONNX Runtime regressor
/// when built with the `onnx` feature.
pub fn load_model(path: &Path) -> anyhow::Result<Box<dyn PriceModel>> {
    if !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()).into());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => {
            let model = LinearModel::load(path)?;
            info!(model = %path.display(), kind = "linear", "loaded price model");
            Ok(Box::new(model))
        }
        #[cfg(feature = "onnx")]
        Some("onnx") => {
            let model = crate::onnx::OnnxPriceModel::load(path)?;
            info!(model = %path.display(), kind = "onnx", "loaded price model");
            Ok(Box::new(model))
        }
        #[cfg(not(feature = "onnx"))]
        Some("onnx") => Err(ModelError::OnnxDisabled(path.to_path_buf()).into()),
        _ => Err(ModelError::UnsupportedFormat(path.to_path_buf()).into()),
    }
}
