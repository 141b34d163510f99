//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Simulated STARS/OSMO exchange-rate line
    pub series_color: Color32,
    pub series_line_width: f32,
    /// Vertical cross-hair marker at the hovered point
    pub crosshair_color: Color32,
    pub crosshair_line_width: f32,
    /// Marker drawn on the hovered data point
    pub hover_marker_color: Color32,
    pub hover_marker_radius: f32,
    /// Decimals shown on the y axis
    pub y_axis_decimals: usize,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    series_color: Color32::from_rgb(99, 102, 241), // Indigo
    series_line_width: 2.0,
    crosshair_color: Color32::from_rgb(160, 160, 160),
    crosshair_line_width: 1.0,
    hover_marker_color: Color32::from_rgb(255, 215, 0), // Gold
    hover_marker_radius: 4.0,
    y_axis_decimals: 4,
};
