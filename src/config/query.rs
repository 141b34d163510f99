//! Query-string keys and the default value set merged under caller input.

use std::ops::RangeInclusive;

pub const KEY_DURATION: &str = "duration";
pub const KEY_INITIAL_WEIGHT: &str = "initial_weight";
pub const KEY_END_WEIGHT: &str = "end_weight";
pub const KEY_DEPOSIT: &str = "deposit";
pub const KEY_FEES: &str = "fees";
pub const KEY_VOLUME: &str = "volume";

/// Order in which keys appear in a share link.
pub const SHARE_KEY_ORDER: [&str; 6] = [
    KEY_DURATION,
    KEY_VOLUME,
    KEY_FEES,
    KEY_DEPOSIT,
    KEY_INITIAL_WEIGHT,
    KEY_END_WEIGHT,
];

/// Accepted range for weights, deposits and volume.
pub const AMOUNT_RANGE: RangeInclusive<f64> = 0.0..=1e15;
/// Accepted range for each fee fraction.
pub const FEE_RANGE: RangeInclusive<f64> = 0.0..=1.0;

pub struct QueryDefaults {
    pub duration: &'static str,
    pub initial_weight: &'static str,
    pub end_weight: &'static str,
    pub deposit: &'static str,
    pub fees: &'static str,
    pub volume: &'static str,
}

impl QueryDefaults {
    pub fn entries(&self) -> [(&'static str, &'static str); 6] {
        [
            (KEY_DURATION, self.duration),
            (KEY_INITIAL_WEIGHT, self.initial_weight),
            (KEY_END_WEIGHT, self.end_weight),
            (KEY_DEPOSIT, self.deposit),
            (KEY_FEES, self.fees),
            (KEY_VOLUME, self.volume),
        ]
    }
}

pub const QUERY_DEFAULTS: QueryDefaults = QueryDefaults {
    duration: "2d",
    initial_weight: "36,4",
    end_weight: "20,20",
    deposit: "50000000,135000",
    fees: "0.02,0.001",
    volume: "100000",
};
