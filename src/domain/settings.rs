use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

use crate::utils::maths_utils::share_pct;

/// A two-asset pair: pool weights or the initial deposit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub stars: f64,
    pub osmo: f64,
}

impl Weight {
    pub const fn new(stars: f64, osmo: f64) -> Self {
        Self { stars, osmo }
    }

    pub fn total(&self) -> f64 {
        self.stars + self.osmo
    }

    /// Share of each side in percent, `(stars, osmo)`.
    /// A zero total yields `(0.0, 0.0)` instead of NaN.
    pub fn share_pct(&self) -> (f64, f64) {
        let total = self.total();
        (share_pct(self.stars, total), share_pct(self.osmo, total))
    }
}

/// Fractional fee rates, conventionally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    pub swap: f64,
    pub exit: f64,
}

impl Fees {
    pub const fn new(swap: f64, exit: f64) -> Self {
        Self { swap, exit }
    }
}

/// Named run lengths offered to the user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
)]
pub enum DurationBucket {
    #[default]
    TwoDays,
    ThreeDays,
    FourDays,
    FiveDays,
}

impl DurationBucket {
    pub fn name(self) -> &'static str {
        match self {
            DurationBucket::TwoDays => "2d",
            DurationBucket::ThreeDays => "3d",
            DurationBucket::FourDays => "4d",
            DurationBucket::FiveDays => "5d",
        }
    }

    pub fn hours(self) -> u32 {
        match self {
            DurationBucket::TwoDays => 48,
            DurationBucket::ThreeDays => 72,
            DurationBucket::FourDays => 96,
            DurationBucket::FiveDays => 120,
        }
    }

    /// Duration string understood by the simulation backend, e.g. `72h`.
    pub fn wire_duration(self) -> String {
        format!("{}h", self.hours())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|bucket| bucket.name() == name)
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The complete input to one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub initial_weight: Weight,
    pub end_weight: Weight,
    pub deposit: Weight,
    pub duration: DurationBucket,
    /// Daily volume in USD
    pub volume: f64,
    pub fees: Fees,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            initial_weight: Weight::new(36.0, 4.0),
            end_weight: Weight::new(20.0, 20.0),
            deposit: Weight::new(50_000_000.0, 135_000.0),
            duration: DurationBucket::default(),
            volume: 100_000.0,
            fees: Fees::new(0.02, 0.001),
        }
    }
}
