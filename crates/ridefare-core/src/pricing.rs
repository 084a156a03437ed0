//! Final and inferred base price for one quote.

use serde::{Deserialize, Serialize};

use crate::surge::{SurgeResult, classify};

/// Outcome of one pricing request.
///
/// `base_price` is backed out of the model's prediction by dividing through the
/// surge multiplier. That assumes the regressor was trained on surge-inflated
/// fares; nothing in the artifact confirms it, so treat `base_price` as an
/// estimate rather than a quoted fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingOutcome {
    pub predicted_price: f64,
    pub base_price: f64,
    pub demand_supply_ratio: f64,
    pub surge: SurgeResult,
}

impl PricingOutcome {
    /// Combine a model prediction with the surge tier for `demand_supply_ratio`.
    pub fn from_prediction(predicted_price: f64, demand_supply_ratio: f64) -> Self {
        let surge = classify(demand_supply_ratio);
        Self {
            predicted_price,
            base_price: predicted_price / surge.multiplier,
            demand_supply_ratio,
            surge,
        }
    }

    /// Price added by surge on top of the base.
    pub fn surge_premium(&self) -> f64 {
        self.predicted_price - self.base_price
    }
}
