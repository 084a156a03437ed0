//! Feature encoding for the price model.
//!
//! Maps a [`RideRequest`] onto the flat eleven-column record the trained
//! regressor was fit on. Column names and order are a fixed contract with the
//! model artifact; see [`FEATURE_NAMES`].

use serde::{Deserialize, Serialize};

use crate::ride::{LocationCategory, LoyaltyStatus, RideRequest, TimeOfBooking, VehicleType};

pub const FEATURE_COUNT: usize = 11;

/// Model input columns, in the order the regressor expects them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Number_of_Riders",
    "Number_of_Drivers",
    "Location_Category",
    "Customer_Loyalty_Status",
    "Number_of_Past_Rides",
    "Average_Ratings",
    "Time_of_Booking",
    "Vehicle_Type",
    "Expected_Ride_Duration",
    "Demand_Supply_Ratio",
    "Peak_Time",
];

// ── Encoding tables ──

impl LocationCategory {
    pub fn code(self) -> i64 {
        match self {
            Self::Urban => 2,
            Self::Suburban => 1,
            Self::Rural => 0,
        }
    }
}

impl LoyaltyStatus {
    pub fn code(self) -> i64 {
        match self {
            Self::Regular => 0,
            Self::Silver => 1,
            Self::Gold => 2,
        }
    }
}

impl TimeOfBooking {
    pub fn code(self) -> i64 {
        match self {
            Self::Morning => 2,
            Self::Afternoon => 0,
            Self::Evening => 1,
            Self::Night => 3,
        }
    }

    /// Evening and night bookings count as peak time.
    pub fn is_peak(self) -> bool {
        matches!(self, Self::Evening | Self::Night)
    }
}

impl VehicleType {
    pub fn code(self) -> i64 {
        match self {
            Self::Economy => 0,
            Self::Premium => 1,
        }
    }
}

/// Encoded model input for one ride.
///
/// Field order follows [`FEATURE_NAMES`]; serialised names match the model's
/// column names exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "Number_of_Riders")]
    pub riders: i64,
    #[serde(rename = "Number_of_Drivers")]
    pub drivers: i64,
    #[serde(rename = "Location_Category")]
    pub location_category: i64,
    #[serde(rename = "Customer_Loyalty_Status")]
    pub loyalty_status: i64,
    #[serde(rename = "Number_of_Past_Rides")]
    pub past_rides: i64,
    #[serde(rename = "Average_Ratings")]
    pub average_rating: f64,
    #[serde(rename = "Time_of_Booking")]
    pub time_of_booking: i64,
    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: i64,
    #[serde(rename = "Expected_Ride_Duration")]
    pub expected_duration: i64,
    #[serde(rename = "Demand_Supply_Ratio")]
    pub demand_supply_ratio: f64,
    #[serde(rename = "Peak_Time")]
    pub peak_time: i64,
}

impl FeatureVector {
    /// Encode a request. Pure; the same request always yields the same vector.
    pub fn from_request(req: &RideRequest) -> Self {
        Self {
            riders: i64::from(req.riders.get()),
            drivers: i64::from(req.drivers.get()),
            location_category: req.location.code(),
            loyalty_status: req.loyalty.code(),
            past_rides: i64::from(req.past_rides),
            average_rating: req.average_rating,
            time_of_booking: req.time_of_booking.code(),
            vehicle_type: req.vehicle.code(),
            expected_duration: i64::from(req.expected_duration_minutes),
            demand_supply_ratio: req.demand_supply_ratio(),
            peak_time: i64::from(req.time_of_booking.is_peak()),
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.riders as f64,
            self.drivers as f64,
            self.location_category as f64,
            self.loyalty_status as f64,
            self.past_rides as f64,
            self.average_rating,
            self.time_of_booking as f64,
            self.vehicle_type as f64,
            self.expected_duration as f64,
            self.demand_supply_ratio,
            self.peak_time as f64,
        ]
    }

    /// (name, value) pairs in contract order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }
}

impl From<&RideRequest> for FeatureVector {
    fn from(req: &RideRequest) -> Self {
        Self::from_request(req)
    }
}
