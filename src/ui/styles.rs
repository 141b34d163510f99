use eframe::egui::{Color32, RichText, Ui};
use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Renders small, gray text (good for labels like "STARS").
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a "Label: Value" row of the simulation info panel.
    fn info_row(&mut self, label: &str, value: &str);

    /// Renders a weight share such as "90.00%" in the side's color.
    fn label_share(&mut self, pct: f64, color: Color32);

    /// Renders a section header using the configured global color.
    fn label_header(&mut self, text: impl Into<String>);

    /// Renders an error message (Red).
    fn label_error(&mut self, text: impl Into<String>);

    /// Renders a warning/info message (Yellow/Gold).
    fn label_warning(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.label));
    }

    fn info_row(&mut self, label: &str, value: &str) {
        self.label(RichText::new(label).strong().color(UI_CONFIG.colors.heading));
        self.label(RichText::new(value).color(UI_CONFIG.colors.info_value));
        self.end_row();
    }

    fn label_share(&mut self, pct: f64, color: Color32) {
        self.label(RichText::new(format!("{:.2}%", pct)).small().color(color));
    }

    fn label_header(&mut self, text: impl Into<String>) {
        let text = text.into().to_uppercase();
        self.heading(RichText::new(text).color(UI_CONFIG.colors.heading).monospace());
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(Color32::from_rgb(255, 100, 100)));
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::from_rgb(255, 215, 0)));
    }
}
