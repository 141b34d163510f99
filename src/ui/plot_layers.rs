use egui_plot::{PlotPoints, PlotUi, Points, VLine};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::SimulationResponse;
use crate::ui::ui_text::UI_TEXT;

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub series: &'a SimulationResponse,
    /// Point the hover readout belongs to, `(time, value)`
    pub hovered: Option<(i64, f64)>,
    /// Whether the pointer is currently over the plot
    pub pointer_inside: bool,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. SERIES LAYER (Simulated exchange rate)
// ============================================================================
pub struct SeriesLayer;

impl PlotLayer for SeriesLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let points: Vec<[f64; 2]> = ctx
            .series
            .data
            .iter()
            .map(|point| [point.time as f64, point.value])
            .collect();

        let line = egui_plot::Line::new(UI_TEXT.plot_series_name, PlotPoints::new(points))
            .color(PLOT_CONFIG.series_color)
            .width(PLOT_CONFIG.series_line_width);

        plot_ui.line(line);
    }
}

// ============================================================================
// 2. CROSSHAIR LAYER
// ============================================================================
pub struct CrosshairLayer;

impl PlotLayer for CrosshairLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        // Only while the pointer is on the plot; the readout itself stays sticky
        if !ctx.pointer_inside {
            return;
        }
        if let Some((time, _)) = ctx.hovered {
            plot_ui.vline(
                VLine::new("crosshair", time as f64)
                    .color(PLOT_CONFIG.crosshair_color)
                    .width(PLOT_CONFIG.crosshair_line_width),
            );
        }
    }
}

// ============================================================================
// 3. HOVER MARKER LAYER
// ============================================================================
pub struct HoverMarkerLayer;

impl PlotLayer for HoverMarkerLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if let Some((time, value)) = ctx.hovered {
            plot_ui.points(
                Points::new("hovered", PlotPoints::new(vec![[time as f64, value]]))
                    .color(PLOT_CONFIG.hover_marker_color)
                    .radius(PLOT_CONFIG.hover_marker_radius),
            );
        }
    }
}
