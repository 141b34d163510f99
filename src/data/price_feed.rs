use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{FEED, QuoteSchema};

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current external price in USD. Must be positive.
    async fn fetch_price(&self) -> Result<f64>;

    /// A unique identifier for this source (for logs).
    fn signature(&self) -> &'static str;
}

impl QuoteSchema {
    /// Map a quote body onto the single positive USD price contract.
    pub fn normalize(&self, body: &Value) -> Result<f64> {
        let raw = match self {
            QuoteSchema::Flat => body.get("price"),
            QuoteSchema::Keyed { asset } => body.get(asset.as_str()).and_then(|v| v.get("usd")),
        }
        .ok_or_else(|| anyhow!("quote body has no price for schema {:?}", self))?;

        let price = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| anyhow!("quote price is not numeric: {}", raw))?;

        if !price.is_finite() || price <= 0.0 {
            bail!("quote price must be positive, got {}", price);
        }
        Ok(price)
    }
}

/// Polls a JSON quote endpoint over HTTP.
pub struct HttpPriceSource {
    client: reqwest::Client,
    url: String,
    schema: QuoteSchema,
}

impl HttpPriceSource {
    pub fn new(url: impl Into<String>, schema: QuoteSchema) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(FEED.request_timeout_ms))
            .build()
            .context("Failed to build price feed HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
            schema,
        })
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_price(&self) -> Result<f64> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context(format!("Price request to {} failed", self.url))?
            .error_for_status()
            .context(format!("Price endpoint {} returned an error status", self.url))?;

        let body: Value = response
            .json()
            .await
            .context("Price response is not valid JSON")?;

        self.schema.normalize(&body)
    }

    fn signature(&self) -> &'static str {
        "HTTP quote endpoint"
    }
}

/// A committed price together with the sequence number of the fetch that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSample {
    pub seq: u64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    /// A newer fetch already committed
    Stale,
    /// The owning poller was stopped
    Closed,
}

#[derive(Debug, Default)]
struct CellState {
    issued: u64,
    held: Option<PriceSample>,
    closed: bool,
}

/// Single-writer price cell shared between the poll task and the UI.
///
/// Fetches take a sequence number at issue time; a completion commits only if
/// it was issued after the currently held sample, so a slow old response can
/// never overwrite a newer one.
#[derive(Debug, Clone, Default)]
pub struct PriceCell {
    inner: Arc<Mutex<CellState>>,
}

impl PriceCell {
    fn state(&self) -> MutexGuard<'_, CellState> {
        // A panicking writer cannot leave CellState half-updated
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reserve the next sequence number for a fetch about to be issued.
    pub fn issue(&self) -> u64 {
        let mut state = self.state();
        state.issued += 1;
        state.issued
    }

    pub fn commit(&self, seq: u64, price: f64) -> CommitOutcome {
        let mut state = self.state();
        if state.closed {
            return CommitOutcome::Closed;
        }
        if state.held.is_some_and(|held| held.seq >= seq) {
            return CommitOutcome::Stale;
        }
        state.held = Some(PriceSample { seq, price });
        CommitOutcome::Applied
    }

    pub fn latest(&self) -> Option<PriceSample> {
        self.state().held
    }

    pub fn close(&self) {
        self.state().closed = true;
    }
}

/// Handle to a running poll loop. Dropping the handle stops polling.
pub struct PriceFeedPoller {
    cell: PriceCell,
    task: Option<JoinHandle<()>>,
}

impl PriceFeedPoller {
    /// Issue one fetch immediately, then one per `interval` until stopped.
    pub fn start(interval: Duration, source: Arc<dyn PriceSource>, runtime: &Handle) -> Self {
        log::info!(
            "Starting price feed ({}) every {:?}",
            source.signature(),
            interval
        );
        let cell = PriceCell::default();
        let task = runtime.spawn(poll_loop(interval, source, cell.clone()));
        Self {
            cell,
            task: Some(task),
        }
    }

    /// Cancel future and in-flight fetches. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            self.cell.close();
            task.abort();
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_shutdown {
                log::info!("Price feed stopped");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn latest(&self) -> Option<PriceSample> {
        self.cell.latest()
    }

    /// Latest committed price, `None` until the first successful fetch.
    pub fn price(&self) -> Option<f64> {
        self.latest().map(|sample| sample.price)
    }
}

impl Drop for PriceFeedPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(interval: Duration, source: Arc<dyn PriceSource>, cell: PriceCell) {
    // First tick completes immediately
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Dropping the set (on abort) aborts every in-flight fetch
    let mut in_flight: JoinSet<(u64, Result<f64>)> = JoinSet::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let seq = cell.issue();
                let source = Arc::clone(&source);
                in_flight.spawn(async move { (seq, source.fetch_price().await) });
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                match joined {
                    Ok((seq, Ok(price))) => {
                        let outcome = cell.commit(seq, price);
                        if outcome != CommitOutcome::Applied {
                            log::debug!("Discarded price #{} ({:?})", seq, outcome);
                        }
                        #[cfg(debug_assertions)]
                        if DEBUG_FLAGS.print_price_feed_updates {
                            log::info!("[price-feed] #{} -> {:.6} ({:?})", seq, price, outcome);
                        }
                    }
                    Ok((seq, Err(e))) => {
                        log::warn!("Price fetch #{} failed, keeping previous price: {:#}", seq, e);
                    }
                    Err(join_err) if join_err.is_cancelled() => {}
                    Err(join_err) => {
                        log::warn!("Price fetch task panicked: {}", join_err);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays `(delay_ms, result)` per call; calls past the script fail.
    struct ScriptedSource {
        script: Vec<(u64, Option<f64>)>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<(u64, Option<f64>)>) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceSource for ScriptedSource {
        async fn fetch_price(&self) -> Result<f64> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script.get(call).copied() {
                Some((delay_ms, result)) => {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    result.ok_or_else(|| anyhow!("scripted failure"))
                }
                None => bail!("script exhausted"),
            }
        }

        fn signature(&self) -> &'static str {
            "scripted"
        }
    }

    /// Always succeeds immediately with the same price.
    struct FixedSource {
        price: f64,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceSource for FixedSource {
        async fn fetch_price(&self) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.price)
        }

        fn signature(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn older_completion_cannot_overwrite_newer_commit() {
        let cell = PriceCell::default();
        let a = cell.issue();
        let b = cell.issue();
        assert!(b > a);

        assert_eq!(cell.commit(b, 12.0), CommitOutcome::Applied);
        assert_eq!(cell.commit(a, 10.0), CommitOutcome::Stale);
        assert_eq!(cell.latest(), Some(PriceSample { seq: b, price: 12.0 }));
    }

    #[test]
    fn in_order_completions_all_apply() {
        let cell = PriceCell::default();
        let a = cell.issue();
        let b = cell.issue();
        assert_eq!(cell.commit(a, 10.0), CommitOutcome::Applied);
        assert_eq!(cell.commit(b, 12.0), CommitOutcome::Applied);
        assert_eq!(cell.latest().map(|s| s.price), Some(12.0));
    }

    #[test]
    fn closed_cell_rejects_commits() {
        let cell = PriceCell::default();
        let seq = cell.issue();
        cell.close();
        assert_eq!(cell.commit(seq, 1.0), CommitOutcome::Closed);
        assert_eq!(cell.latest(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_early_fetch_is_discarded() {
        // A: issued t=0, resolves t=300 with 10
        // B: issued t=100, resolves t=150 with 12
        let source = ScriptedSource::new(vec![(300, Some(10.0)), (50, Some(12.0))]);
        let poller = PriceFeedPoller::start(
            Duration::from_millis(100),
            source.clone(),
            &Handle::current(),
        );

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(poller.price(), Some(12.0));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(source.calls() >= 4);
        assert_eq!(poller.price(), Some(12.0));
        assert_eq!(poller.latest().map(|s| s.seq), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_keeps_previous_price() {
        let source = ScriptedSource::new(vec![(0, Some(5.0)), (0, None), (0, None)]);
        let poller = PriceFeedPoller::start(
            Duration::from_millis(100),
            source.clone(),
            &Handle::current(),
        );

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(source.calls(), 3);
        assert_eq!(poller.price(), Some(5.0));
        assert!(poller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_halts_fetching() {
        let source = Arc::new(FixedSource {
            price: 1.5,
            calls: AtomicUsize::new(0),
        });
        let mut poller = PriceFeedPoller::start(
            Duration::from_millis(100),
            source.clone(),
            &Handle::current(),
        );

        tokio::time::sleep(Duration::from_millis(250)).await;
        let calls_at_stop = source.calls.load(Ordering::SeqCst);
        assert_eq!(calls_at_stop, 3);

        poller.stop();
        poller.stop();
        assert!(!poller.is_running());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), calls_at_stop);
        assert_eq!(poller.price(), Some(1.5));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_discards_in_flight_fetch() {
        let source = ScriptedSource::new(vec![(200, Some(7.0))]);
        let mut poller = PriceFeedPoller::start(
            Duration::from_secs(10),
            source.clone(),
            &Handle::current(),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(source.calls(), 1);
        poller.stop();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(poller.price(), None);
    }

    #[test]
    fn normalizes_both_quote_schemas() {
        assert_eq!(
            QuoteSchema::Flat.normalize(&json!({"price": 0.85})).unwrap(),
            0.85
        );
        assert_eq!(
            QuoteSchema::Flat.normalize(&json!({"price": "0.85"})).unwrap(),
            0.85
        );

        let keyed = QuoteSchema::Keyed {
            asset: "osmosis".to_string(),
        };
        assert_eq!(
            keyed.normalize(&json!({"osmosis": {"usd": 0.42}})).unwrap(),
            0.42
        );
        assert!(keyed.normalize(&json!({"price": 0.42})).is_err());
    }

    #[test]
    fn rejects_non_positive_or_missing_price() {
        assert!(QuoteSchema::Flat.normalize(&json!({"price": 0})).is_err());
        assert!(QuoteSchema::Flat.normalize(&json!({"price": -1.0})).is_err());
        assert!(QuoteSchema::Flat.normalize(&json!({"price": null})).is_err());
        assert!(QuoteSchema::Flat.normalize(&json!({})).is_err());
    }

    #[tokio::test]
    async fn http_source_reads_flat_quote() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/tokens/v1/price/OSMO");
                then.status(200).json_body(json!({"price": 0.7731}));
            })
            .await;

        let source =
            HttpPriceSource::new(server.url("/tokens/v1/price/OSMO"), QuoteSchema::Flat).unwrap();
        let price = source.fetch_price().await.unwrap();

        assert!((price - 0.7731).abs() < 1e-12);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_source_reads_keyed_quote() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/simple/price");
                then.status(200)
                    .json_body(json!({"osmosis": {"usd": 1.25}}));
            })
            .await;

        let source = HttpPriceSource::new(
            server.url("/simple/price"),
            QuoteSchema::Keyed {
                asset: "osmosis".to_string(),
            },
        )
        .unwrap();

        assert_eq!(source.fetch_price().await.unwrap(), 1.25);
    }

    #[tokio::test]
    async fn http_source_fails_on_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/price");
                then.status(503);
            })
            .await;

        let source = HttpPriceSource::new(server.url("/price"), QuoteSchema::Flat).unwrap();
        assert!(source.fetch_price().await.is_err());
    }
}
