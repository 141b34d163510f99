use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::PriceSample;
use crate::domain::{PricePoint, SimulationResponse};

use super::listener::{CrosshairHub, CrosshairSubscription, SubscribeError};
use super::messages::{ChartInput, CrosshairEvent};
use super::state::{ChartPhase, HoverState};

/// Keeps the plotted series, the hover readout and the external price in step.
///
/// Construction acquires the chart surface's cross-hair listener; dropping the
/// engine releases it. All state is owned here and mutated only through
/// [`ChartSyncEngine::apply`].
pub struct ChartSyncEngine {
    phase: ChartPhase,
    hover: HoverState,
    /// Timestamp the readout belongs to
    hover_time: Option<i64>,
    series: Option<Arc<SimulationResponse>>,
    external_price: Option<PriceSample>,
    crosshair: CrosshairSubscription,
}

impl ChartSyncEngine {
    pub fn new(hub: &CrosshairHub) -> Result<Self, SubscribeError> {
        Ok(Self {
            phase: ChartPhase::Idle,
            hover: HoverState::default(),
            hover_time: None,
            series: None,
            external_price: None,
            crosshair: hub.subscribe()?,
        })
    }

    /// Feed one input through the state machine. Returns `true` if anything
    /// visible changed.
    pub fn apply(&mut self, input: ChartInput) -> bool {
        match input {
            ChartInput::SimulationArrived(series) => self.on_simulation(series),
            ChartInput::CrosshairMoved(event) => self.on_crosshair(event),
            ChartInput::PriceUpdated(sample) => self.on_price(sample),
        }
    }

    /// Drain pending cross-hair events from the listener.
    pub fn pump(&mut self) -> bool {
        let events: Vec<CrosshairEvent> = self.crosshair.pending().collect();
        let mut changed = false;
        for event in events {
            changed |= self.apply(ChartInput::CrosshairMoved(event));
        }
        changed
    }

    fn on_simulation(&mut self, series: Arc<SimulationResponse>) -> bool {
        match series.first_point() {
            Some(first) => {
                self.hover = HoverState::from_point(first);
                self.hover_time = Some(first.time);
                self.phase = ChartPhase::HasData;
            }
            None => {
                self.hover = HoverState::default();
                self.hover_time = None;
                self.phase = ChartPhase::Idle;
            }
        }
        self.series = Some(series);
        true
    }

    fn on_crosshair(&mut self, event: CrosshairEvent) -> bool {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_crosshair_events {
            log::info!("[crosshair] {:?} in {:?}", event.time, self.phase);
        }

        // Off the plot: keep the last readout
        let Some(time) = event.time else {
            return false;
        };
        if self.phase == ChartPhase::Idle {
            return false;
        }
        let Some(value) = self.series.as_deref().and_then(|series| series.value_at(time)) else {
            return false;
        };

        let next = HoverState::from_point(&PricePoint { time, value });
        self.phase = ChartPhase::Hovering;
        self.hover_time = Some(time);
        if next == self.hover {
            return false;
        }
        self.hover = next;
        true
    }

    fn on_price(&mut self, sample: PriceSample) -> bool {
        if self
            .external_price
            .is_some_and(|held| held.seq >= sample.seq)
        {
            return false;
        }
        self.external_price = Some(sample);
        true
    }

    pub fn phase(&self) -> ChartPhase {
        self.phase
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn hover_time(&self) -> Option<i64> {
        self.hover_time
    }

    pub fn series(&self) -> Option<&SimulationResponse> {
        self.series.as_deref()
    }

    /// External price in USD; zero until the first poll lands.
    pub fn external_price(&self) -> f64 {
        self.external_price.map(|s| s.price).unwrap_or(0.0)
    }

    /// Hovered exchange rate priced in USD. Computed on every read.
    pub fn derived_price(&self) -> f64 {
        self.hover.value * self.external_price()
    }
}
