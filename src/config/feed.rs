//! External price feed configuration.

/// How the quote endpoint shapes its JSON body.
///
/// Both variants normalize to a single positive USD price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteSchema {
    /// `{ "price": 1.23 }`
    Flat,
    /// `{ "<asset>": { "usd": 1.23 } }`
    Keyed { asset: String },
}

pub struct FeedConfig {
    /// Quote endpoint polled by the price feed
    pub quote_url: &'static str,
    /// Poll interval (milliseconds)
    pub poll_interval_ms: u64,
    /// Per-request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Symbol shown next to the polled price
    pub quote_symbol: &'static str,
    /// Asset key looked up when the endpoint uses the keyed schema
    pub keyed_asset: &'static str,
}

pub const FEED: FeedConfig = FeedConfig {
    quote_url: "https://api-osmosis.imperator.co/tokens/v1/price/OSMO",
    poll_interval_ms: 10_000,
    request_timeout_ms: 5_000,
    quote_symbol: "OSMO",
    keyed_asset: "osmosis",
};
