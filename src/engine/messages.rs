use std::sync::Arc;

use crate::data::PriceSample;
use crate::domain::SimulationResponse;

/// Pointer movement over the chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosshairEvent {
    /// Timestamp of the plotted point under the pointer; `None` when the
    /// pointer is off the plot
    pub time: Option<i64>,
}

/// Everything that can change what the chart and info panel display.
#[derive(Debug, Clone)]
pub enum ChartInput {
    SimulationArrived(Arc<SimulationResponse>),
    CrosshairMoved(CrosshairEvent),
    PriceUpdated(PriceSample),
}
