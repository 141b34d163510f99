use crate::domain::PricePoint;
use crate::utils::time_utils::format_date_hours;

/// What the info panel shows for the hovered (or seeded) point.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverState {
    /// Exchange rate with 6 decimals
    pub price: String,
    pub date: String,
    /// Raw exchange rate, multiplied by the external price for display
    pub value: f64,
}

impl Default for HoverState {
    fn default() -> Self {
        Self {
            price: "0".to_string(),
            date: "-".to_string(),
            value: 0.0,
        }
    }
}

impl HoverState {
    pub fn from_point(point: &PricePoint) -> Self {
        Self {
            price: format!("{:.6}", point.value),
            date: format_date_hours(point.time),
            value: point.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartPhase {
    /// No series plotted
    #[default]
    Idle,
    /// Series plotted, hover seeded from its first point
    HasData,
    /// Hover follows the cross-hair
    Hovering,
}
