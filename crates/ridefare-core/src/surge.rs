//! Surge classification from the demand/supply ratio.
//!
//! Four half-open buckets, lower bound inclusive:
//!
//! | ratio            | multiplier | level         |
//! |------------------|-----------:|---------------|
//! | r < 1.0          | 1.0        | NoSurge       |
//! | 1.0 <= r < 1.5   | 1.2        | MildSurge     |
//! | 1.5 <= r < 2.0   | 1.5        | HighSurge     |
//! | r >= 2.0         | 2.0        | ExtremeSurge  |

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurgeLevel {
    NoSurge,
    MildSurge,
    HighSurge,
    ExtremeSurge,
}

impl SurgeLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::NoSurge => 1.0,
            Self::MildSurge => 1.2,
            Self::HighSurge => 1.5,
            Self::ExtremeSurge => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NoSurge => "No Surge",
            Self::MildSurge => "Mild Surge",
            Self::HighSurge => "High Surge",
            Self::ExtremeSurge => "Extreme Surge",
        }
    }

    /// Traffic-light badge shown next to the label.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::NoSurge => "🟢",
            Self::MildSurge => "🟡",
            Self::HighSurge => "🟠",
            Self::ExtremeSurge => "🔴",
        }
    }
}

impl fmt::Display for SurgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurgeResult {
    pub multiplier: f64,
    pub level: SurgeLevel,
}

impl From<SurgeLevel> for SurgeResult {
    fn from(level: SurgeLevel) -> Self {
        Self {
            multiplier: level.multiplier(),
            level,
        }
    }
}

/// Classify a demand/supply ratio.
///
/// Total over all inputs. Negative ratios land in `NoSurge`; a NaN fails every
/// comparison and lands in `ExtremeSurge`.
pub fn classify(ratio: f64) -> SurgeResult {
    let level = if ratio < 1.0 {
        SurgeLevel::NoSurge
    } else if ratio < 1.5 {
        SurgeLevel::MildSurge
    } else if ratio < 2.0 {
        SurgeLevel::HighSurge
    } else {
        SurgeLevel::ExtremeSurge
    };
    level.into()
}
