//! Configuration module for the LBP simulator client.

mod debug; // Private: use crate::config::DEBUG_FLAGS, not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod feed;
pub mod plot;
pub mod query;
pub mod simulation;

// Re-export commonly used items
pub use feed::{FEED, QuoteSchema};
pub use plot::PLOT_CONFIG;
pub use query::{AMOUNT_RANGE, FEE_RANGE, QUERY_DEFAULTS, SHARE_KEY_ORDER};
pub use simulation::SIMULATION;
