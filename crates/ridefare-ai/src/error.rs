use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported model format: {0} (expected .json or .onnx)")]
    UnsupportedFormat(PathBuf),

    #[error("ONNX support not compiled in; rebuild with --features onnx to load {0}")]
    OnnxDisabled(PathBuf),

    #[error("feature {index} is {found:?}, model input contract expects {expected:?}")]
    FeatureMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("model declares {found} features, expected {expected}")]
    FeatureCount { expected: usize, found: usize },

    #[error("model has {found} coefficients for {expected} features")]
    CoefficientCount { expected: usize, found: usize },

    #[error("model input width is {found}, expected {expected}")]
    InputWidth { expected: usize, found: usize },
}
