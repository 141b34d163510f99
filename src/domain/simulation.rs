use serde::{Deserialize, Deserializer, Serialize};

/// One sample of the simulated STARS/OSMO exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix seconds
    pub time: i64,
    #[serde(deserialize_with = "number_or_decimal_string")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub amount: String,
    pub denom: String,
}

/// A pool asset as reported by the simulation service.
/// Amounts stay decimal strings to avoid float precision loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolAsset {
    pub token: Token,
    pub weight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    #[serde(default)]
    pub daily_volume: f64,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default)]
    pub total_buys: u64,
    /// Ascending by `time`
    #[serde(default)]
    pub data: Vec<PricePoint>,
    #[serde(default)]
    pub initial_assets: Vec<PoolAsset>,
    #[serde(default)]
    pub end_assets: Vec<PoolAsset>,
}

impl SimulationResponse {
    pub fn first_point(&self) -> Option<&PricePoint> {
        self.data.first()
    }

    pub fn last_point(&self) -> Option<&PricePoint> {
        self.data.last()
    }

    /// Series value at exactly `time`, if a point was plotted there.
    pub fn value_at(&self, time: i64) -> Option<f64> {
        self.data
            .binary_search_by_key(&time, |point| point.time)
            .ok()
            .map(|idx| self.data[idx].value)
    }

    /// Timestamp of the plotted point closest to `x` (unix seconds, fractional).
    /// Returns `None` when `x` falls outside the plotted range.
    pub fn nearest_time(&self, x: f64) -> Option<i64> {
        let first = self.data.first()?;
        let last = self.data.last()?;
        if !x.is_finite() || x < first.time as f64 || x > last.time as f64 {
            return None;
        }

        let idx = self.data.partition_point(|point| (point.time as f64) < x);
        let after = self.data.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.data.get(i));

        match (before, after) {
            (Some(b), Some(a)) => {
                if (x - b.time as f64) <= (a.time as f64 - x) {
                    Some(b.time)
                } else {
                    Some(a.time)
                }
            }
            (Some(b), None) => Some(b.time),
            (None, Some(a)) => Some(a.time),
            (None, None) => None,
        }
    }

    /// First simulated rate priced in USD through `quote_price`.
    pub fn start_price(&self, quote_price: f64) -> f64 {
        self.first_point()
            .map(|p| p.value * quote_price)
            .unwrap_or(0.0)
    }

    /// Last simulated rate priced in USD through `quote_price`.
    pub fn end_price(&self, quote_price: f64) -> f64 {
        self.last_point()
            .map(|p| p.value * quote_price)
            .unwrap_or(0.0)
    }
}

/// `"<amount><denom>,<amount><denom>"` for a two-asset pool, `None` otherwise.
pub fn format_asset_pair(assets: &[PoolAsset]) -> Option<String> {
    match assets {
        [a, b, ..] => Some(format!(
            "{}{},{}{}",
            a.token.amount, a.token.denom, b.token.amount, b.token.denom
        )),
        _ => None,
    }
}

/// The backend encodes fixed-point decimals as JSON strings.
fn number_or_decimal_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}
