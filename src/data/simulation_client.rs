use std::fmt;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Serialize, Serializer};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::SIMULATION;
use crate::domain::{RunSettings, SimulationResponse, Weight};
use crate::utils::maths_utils::usd_to_quote_units;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// No positive external price yet, so USD volume cannot be converted
    PriceUnavailable,
    Transport(String),
    Status(u16),
    Decode(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::PriceUnavailable => {
                write!(f, "External price not available yet, cannot convert volume")
            }
            SubmitError::Transport(msg) => write!(f, "Simulation request failed: {}", msg),
            SubmitError::Status(code) => write!(f, "Simulation service returned HTTP {}", code),
            SubmitError::Decode(msg) => write!(f, "Invalid simulation response: {}", msg),
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WirePair {
    #[serde(serialize_with = "integral_number")]
    pub stars: f64,
    #[serde(serialize_with = "integral_number")]
    pub osmo: f64,
}

impl From<Weight> for WirePair {
    fn from(weight: Weight) -> Self {
        Self {
            stars: weight.stars,
            osmo: weight.osmo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireFees {
    pub swap: String,
    pub exit: String,
}

/// Body of `POST /api/simulate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    /// Canonical duration, e.g. `72h`
    pub duration: String,
    pub initial_weight: WirePair,
    pub end_weight: WirePair,
    /// Daily volume in quote units (OSMO)
    pub volume: i64,
    pub deposit: WirePair,
    pub fees: WireFees,
}

impl SimulateRequest {
    /// Build the wire request, converting the USD volume at `quote_price`.
    pub fn from_settings(
        settings: &RunSettings,
        quote_price: Option<f64>,
    ) -> Result<Self, SubmitError> {
        let volume = quote_price
            .and_then(|price| usd_to_quote_units(settings.volume, price))
            .ok_or(SubmitError::PriceUnavailable)?;

        Ok(Self {
            duration: settings.duration.wire_duration(),
            initial_weight: settings.initial_weight.into(),
            end_weight: settings.end_weight.into(),
            volume: volume as i64,
            deposit: settings.deposit.into(),
            fees: WireFees {
                swap: settings.fees.swap.to_string(),
                exit: settings.fees.exit.to_string(),
            },
        })
    }
}

/// Whole values go out as JSON integers; the backend's fields are integral.
fn integral_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[async_trait]
pub trait SimulationClient: Send + Sync {
    /// Single attempt, no retry.
    async fn submit(&self, request: &SimulateRequest) -> Result<SimulationResponse, SubmitError>;
}

pub struct HttpSimulationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSimulationClient {
    pub fn new(api_base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(SIMULATION.request_timeout_ms))
            .build()
            .context("Failed to build simulation HTTP client")?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}{}",
                api_base_url.trim_end_matches('/'),
                SIMULATION.simulate_path
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SimulationClient for HttpSimulationClient {
    async fn submit(&self, request: &SimulateRequest) -> Result<SimulationResponse, SubmitError> {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_simulation_requests {
            log::info!(
                "POST {} {}",
                self.endpoint,
                serde_json::to_string(request).unwrap_or_default()
            );
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        let parsed: SimulationResponse = response
            .json()
            .await
            .map_err(|e| SubmitError::Decode(e.to_string()))?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_simulation_requests {
            log::info!("Simulation returned {} points", parsed.data.len());
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DurationBucket, Fees};
    use httpmock::prelude::*;
    use serde_json::json;

    fn settings() -> RunSettings {
        RunSettings {
            initial_weight: Weight::new(36.0, 4.0),
            end_weight: Weight::new(20.0, 20.0),
            deposit: Weight::new(50_000_000.0, 135_000.0),
            duration: DurationBucket::ThreeDays,
            volume: 100_000.0,
            fees: Fees::new(0.02, 0.001),
        }
    }

    fn expected_body() -> serde_json::Value {
        json!({
            "duration": "72h",
            "initialWeight": {"stars": 36, "osmo": 4},
            "endWeight": {"stars": 20, "osmo": 20},
            "volume": 50000,
            "deposit": {"stars": 50000000, "osmo": 135000},
            "fees": {"swap": "0.02", "exit": "0.001"}
        })
    }

    #[test]
    fn request_converts_volume_and_stringifies_fees() {
        let request = SimulateRequest::from_settings(&settings(), Some(2.0)).unwrap();
        assert_eq!(serde_json::to_value(&request).unwrap(), expected_body());
    }

    #[test]
    fn request_needs_positive_price() {
        assert!(matches!(
            SimulateRequest::from_settings(&settings(), None),
            Err(SubmitError::PriceUnavailable)
        ));
        assert!(matches!(
            SimulateRequest::from_settings(&settings(), Some(0.0)),
            Err(SubmitError::PriceUnavailable)
        ));
    }

    #[test]
    fn fractional_weights_stay_fractional() {
        let mut s = settings();
        s.initial_weight = Weight::new(36.5, 3.5);
        let request = SimulateRequest::from_settings(&s, Some(1.0)).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["initialWeight"], json!({"stars": 36.5, "osmo": 3.5}));
    }

    #[tokio::test]
    async fn submit_posts_request_and_parses_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/simulate")
                    .json_body(expected_body());
                then.status(200).json_body(json!({
                    "data": [
                        {"time": 1640995200, "value": "0.0125"},
                        {"time": 1640998800, "value": "0.0131"}
                    ],
                    "daily_volume": 50000,
                    "total_volume": 150000,
                    "total_buys": 321,
                    "initial_assets": [
                        {"token": {"amount": "50000000", "denom": "ustars"}, "weight": "36"},
                        {"token": {"amount": "135000", "denom": "uosmo"}, "weight": "4"}
                    ]
                }));
            })
            .await;

        let client = HttpSimulationClient::new(&server.base_url()).unwrap();
        let request = SimulateRequest::from_settings(&settings(), Some(2.0)).unwrap();
        let response = client.submit(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.total_buys, 321);
        assert_eq!(response.initial_assets.len(), 2);
        assert!(response.end_assets.is_empty());
    }

    #[tokio::test]
    async fn submit_reports_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/simulate");
                then.status(500).body("boom");
            })
            .await;

        let client = HttpSimulationClient::new(&server.base_url()).unwrap();
        let request = SimulateRequest::from_settings(&settings(), Some(2.0)).unwrap();
        let err = client.submit(&request).await.unwrap_err();
        assert!(matches!(err, SubmitError::Status(500)));
    }

    #[tokio::test]
    async fn submit_reports_unparseable_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/simulate");
                then.status(200).body("not json");
            })
            .await;

        let client = HttpSimulationClient::new(&server.base_url()).unwrap();
        let request = SimulateRequest::from_settings(&settings(), Some(2.0)).unwrap();
        let err = client.submit(&request).await.unwrap_err();
        assert!(matches!(err, SubmitError::Decode(_)));
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = HttpSimulationClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/api/simulate");
    }
}
