use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub info_value: Color32,
    pub stars_share: Color32,
    pub osmo_share: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
    pub info_panel_min_width: f32,
    /// Repaint cadence while idle, so polled prices show up (seconds)
    pub idle_repaint_secs: u64,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(129, 140, 248), // Indigo
        subsection_heading: Color32::from_rgb(165, 180, 252),
        central_panel: Color32::from_rgb(20, 22, 30),
        side_panel: Color32::from_rgb(25, 25, 25),
        info_value: Color32::from_gray(230),
        stars_share: Color32::from_rgb(244, 114, 182), // Pink
        osmo_share: Color32::from_rgb(167, 139, 250),  // Violet
    },
    side_panel_min_width: 260.0,
    info_panel_min_width: 240.0,
    idle_repaint_secs: 1,
};
