use eframe::egui;
use egui_plot::{AxisHints, HPlacement, Plot};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::plot::PLOT_CONFIG;
use crate::domain::SimulationResponse;
use crate::engine::{CrosshairEvent, CrosshairHub};
use crate::ui::plot_layers::{
    CrosshairLayer, HoverMarkerLayer, LayerContext, PlotLayer, SeriesLayer,
};
use crate::ui::ui_text::UI_TEXT;
use crate::utils::time_utils::format_date_hours;

/// The chart surface. Publishes pointer movement to whoever listens on its hub.
pub struct PlotView {
    hub: CrosshairHub,
    /// Last timestamp published, so unchanged pointer positions are not re-sent
    last_published: Option<i64>,
    pointer_inside: bool,
}

impl PlotView {
    pub fn new(hub: CrosshairHub) -> Self {
        Self {
            hub,
            last_published: None,
            pointer_inside: false,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        series: &SimulationResponse,
        hovered: Option<(i64, f64)>,
    ) {
        let pointer_inside = self.pointer_inside;

        let response = Plot::new("lbp_price_plot")
            .custom_x_axes(vec![create_x_axis()])
            .custom_y_axes(vec![create_y_axis()])
            // Suppress Defaults
            .label_formatter(|_, _| String::new())
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                let ctx = LayerContext {
                    series,
                    hovered,
                    pointer_inside,
                };

                // Back to front
                let layers: Vec<Box<dyn PlotLayer>> = vec![
                    Box::new(SeriesLayer),
                    Box::new(CrosshairLayer),
                    Box::new(HoverMarkerLayer),
                ];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }

                plot_ui.pointer_coordinate()
            });

        let pointer = response.inner;
        self.pointer_inside = pointer.is_some();
        let time = pointer.and_then(|p| series.nearest_time(p.x));
        self.publish(time);
    }

    /// Forget the last published pointer so the next frame re-sends it.
    pub fn series_replaced(&mut self) {
        self.last_published = None;
    }

    fn publish(&mut self, time: Option<i64>) {
        if time == self.last_published {
            return;
        }
        self.last_published = time;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_crosshair_events {
            log::info!("[plot] pointer at {:?}", time);
        }
        if !self.hub.publish(CrosshairEvent { time }) {
            log::debug!("No cross-hair listener for {:?}", time);
        }
    }
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| format_date_hours(grid_mark.value as i64))
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.plot_y_axis)
        .formatter(|grid_mark, _range| {
            format!("{:.*}", PLOT_CONFIG.y_axis_decimals, grid_mark.value)
        })
        .placement(HPlacement::Left)
}
