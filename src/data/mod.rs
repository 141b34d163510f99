// Network plumbing: external price feed and the simulation service
pub mod price_feed;
pub mod simulation_client;

// Re-export commonly used types
pub use price_feed::{HttpPriceSource, PriceFeedPoller, PriceSample, PriceSource};
pub use simulation_client::{
    HttpSimulationClient, SimulateRequest, SimulationClient, SubmitError,
};
