// Domain types and value objects
pub mod settings;
pub mod simulation;

// Re-export commonly used types
pub use settings::{DurationBucket, Fees, RunSettings, Weight};
pub use simulation::{PoolAsset, PricePoint, SimulationResponse, Token};
