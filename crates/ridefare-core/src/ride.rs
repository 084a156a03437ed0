//! Raw ride parameters as collected from the rider.
//!
//! A [`RideRequest`] is built fresh for every pricing interaction and never
//! persisted. Rider and driver counts are `NonZeroU32`, so the demand/supply
//! ratio derived from them is always defined.

use std::fmt;
use std::num::NonZeroU32;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted customer rating range.
pub const RATING_RANGE: RangeInclusive<f64> = 1.0..=5.0;

/// Accepted expected ride duration, in minutes.
pub const DURATION_RANGE: RangeInclusive<u32> = 5..=180;

pub const DEFAULT_RIDERS: NonZeroU32 = NonZeroU32::new(50).unwrap();
pub const DEFAULT_DRIVERS: NonZeroU32 = NonZeroU32::new(25).unwrap();
pub const DEFAULT_PAST_RIDES: u32 = 20;
pub const DEFAULT_RATING: f64 = 4.2;
pub const DEFAULT_DURATION_MINUTES: u32 = 45;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("average rating {0} outside [1.0, 5.0]")]
    RatingOutOfRange(f64),

    #[error("expected ride duration {0} min outside [5, 180]")]
    DurationOutOfRange(u32),

    #[error("{field} must be a positive integer, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    #[error("{field} must be a non-negative integer, got {value}")]
    Negative { field: &'static str, value: i64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?}, expected one of: {expected}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

// ── Categorical inputs ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationCategory {
    Urban,
    Suburban,
    Rural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoyaltyStatus {
    Regular,
    Silver,
    Gold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfBooking {
    Morning,
    Afternoon,
    Evening,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Economy,
    Premium,
}

impl LocationCategory {
    pub const ALL: [Self; 3] = [Self::Urban, Self::Suburban, Self::Rural];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Suburban => "Suburban",
            Self::Rural => "Rural",
        }
    }
}

impl LoyaltyStatus {
    pub const ALL: [Self; 3] = [Self::Regular, Self::Silver, Self::Gold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }
}

impl TimeOfBooking {
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

impl VehicleType {
    pub const ALL: [Self; 2] = [Self::Economy, Self::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Premium => "Premium",
        }
    }
}

/// Case-insensitive lookup of `value` among the display names of `all`.
fn parse_variant<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    name: fn(&T) -> &'static str,
) -> Result<T, ParseError> {
    let trimmed = value.trim();
    all.iter()
        .find(|v| name(v).eq_ignore_ascii_case(trimmed))
        .copied()
        .ok_or_else(|| ParseError {
            kind,
            value: value.to_string(),
            expected: all.iter().map(name).collect::<Vec<_>>().join(", "),
        })
}

impl FromStr for LocationCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("location category", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for LoyaltyStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("loyalty status", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for TimeOfBooking {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("time of booking", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for VehicleType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("vehicle type", s, &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LoyaltyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TimeOfBooking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Request ──

/// One rider's pricing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub riders: NonZeroU32,
    pub drivers: NonZeroU32,
    pub location: LocationCategory,
    pub loyalty: LoyaltyStatus,
    pub past_rides: u32,
    pub average_rating: f64,
    pub time_of_booking: TimeOfBooking,
    pub vehicle: VehicleType,
    pub expected_duration_minutes: u32,
}

impl Default for RideRequest {
    fn default() -> Self {
        Self {
            riders: DEFAULT_RIDERS,
            drivers: DEFAULT_DRIVERS,
            location: LocationCategory::Urban,
            loyalty: LoyaltyStatus::Regular,
            past_rides: DEFAULT_PAST_RIDES,
            average_rating: DEFAULT_RATING,
            time_of_booking: TimeOfBooking::Morning,
            vehicle: VehicleType::Economy,
            expected_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl RideRequest {
    /// Check the range constraints the input form enforces.
    ///
    /// Counts need no check here: their types already exclude zero.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !RATING_RANGE.contains(&self.average_rating) {
            return Err(RequestError::RatingOutOfRange(self.average_rating));
        }
        if !DURATION_RANGE.contains(&self.expected_duration_minutes) {
            return Err(RequestError::DurationOutOfRange(
                self.expected_duration_minutes,
            ));
        }
        Ok(())
    }

    /// Riders per available driver.
    pub fn demand_supply_ratio(&self) -> f64 {
        f64::from(self.riders.get()) / f64::from(self.drivers.get())
    }
}

/// Convert a raw signed count into a positive one (riders, drivers).
pub fn positive_count(field: &'static str, value: i64) -> Result<NonZeroU32, RequestError> {
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(RequestError::NotPositive { field, value })
}

/// Convert a raw signed count into a non-negative one (past rides, duration).
pub fn non_negative_count(field: &'static str, value: i64) -> Result<u32, RequestError> {
    u32::try_from(value).map_err(|_| RequestError::Negative { field, value })
}
