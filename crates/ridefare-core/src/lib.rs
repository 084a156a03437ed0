pub mod features;
pub mod pricing;
pub mod ride;
pub mod schema;
pub mod surge;

pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use pricing::PricingOutcome;
pub use ride::{
    LocationCategory, LoyaltyStatus, ParseError, RequestError, RideRequest, TimeOfBooking,
    VehicleType,
};
pub use schema::model;
pub use surge::{SurgeLevel, SurgeResult, classify};
