pub mod core;
pub mod listener;
pub mod messages;
pub mod state;

// Re-export key components
pub use core::ChartSyncEngine;
pub use listener::{CrosshairHub, CrosshairSubscription, SubscribeError};
pub use messages::{ChartInput, CrosshairEvent};
pub use state::{ChartPhase, HoverState};
