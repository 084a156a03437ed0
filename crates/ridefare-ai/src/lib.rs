//! Price model inference: the model seam, artifact loaders, and quote orchestration.

mod error;
mod linear;
mod model;
mod quote;
mod shared;

#[cfg(feature = "onnx")]
mod onnx;

pub use error::ModelError;
pub use linear::LinearModel;
pub use model::{PriceModel, load_model};
#[cfg(feature = "onnx")]
pub use onnx::OnnxPriceModel;
pub use quote::{quote, quote_features};
pub use shared::shared_model;
