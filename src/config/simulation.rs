//! Simulation service configuration.

pub struct SimulationConfig {
    /// Base URL of the simulation backend (dev proxy target)
    pub api_base_url: &'static str,
    /// Path the simulation request is posted to
    pub simulate_path: &'static str,
    /// Base URL used when building share links
    pub share_base_url: &'static str,
    /// Per-request timeout (milliseconds). Simulations of 5d runs are slow.
    pub request_timeout_ms: u64,
    /// How long the "Link Copied" confirmation stays visible (milliseconds)
    pub share_confirmation_ms: u64,
}

pub const SIMULATION: SimulationConfig = SimulationConfig {
    api_base_url: "http://localhost:8080",
    simulate_path: "/api/simulate",
    share_base_url: "https://lbp-simulator.publicawesome.dev",
    request_timeout_ms: 120_000,
    share_confirmation_ms: 4_000,
};
