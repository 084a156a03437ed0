//! Quote orchestration: features → model → surge tier → base price.

use ridefare_core::{FeatureVector, PricingOutcome, RideRequest};
use tracing::debug;

use crate::model::PriceModel;

/// Price one ride request.
///
/// Model failures propagate unchanged; there is no retry or fallback fare.
pub fn quote<M: PriceModel + ?Sized>(
    model: &M,
    request: &RideRequest,
) -> anyhow::Result<PricingOutcome> {
    quote_features(model, &FeatureVector::from_request(request))
}

/// Price an already-encoded feature vector.
pub fn quote_features<M: PriceModel + ?Sized>(
    model: &M,
    features: &FeatureVector,
) -> anyhow::Result<PricingOutcome> {
    let predicted = model.predict(features)?;
    let outcome = PricingOutcome::from_prediction(predicted, features.demand_supply_ratio);
    debug!(
        ratio = features.demand_supply_ratio,
        predicted = outcome.predicted_price,
        base = outcome.base_price,
        surge = %outcome.surge.level,
        "quoted ride"
    );
    Ok(outcome)
}
