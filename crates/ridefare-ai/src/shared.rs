//! Process-wide price model: loaded on first use, read-only afterwards.

use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use crate::model::{PriceModel, load_model};

static SHARED: OnceLock<Box<dyn PriceModel>> = OnceLock::new();

/// Return the process-wide model, loading it from `path` on first call.
///
/// Once a model is installed, later calls return it and ignore `path`. If two
/// threads race on the first load, the first model stored wins and the other
/// is dropped.
pub fn shared_model(path: &Path) -> anyhow::Result<&'static dyn PriceModel> {
    if let Some(model) = SHARED.get() {
        debug!("reusing loaded price model");
        return Ok(model.as_ref());
    }
    let model = load_model(path)?;
    Ok(SHARED.get_or_init(|| model).as_ref())
}
