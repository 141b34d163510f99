use eframe::egui::{Context, RichText, Ui, Visuals};

use crate::ui::config::UI_CONFIG;

/// Creates a colored heading with uppercase text and monospace font
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let uppercase_text = text.into().to_uppercase() + ":";
    RichText::new(uppercase_text)
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

/// Creates a colored sub-section heading using the configured label color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Number with `,` thousands separators and a fixed number of decimals.
/// `format_grouped(1234567.891, 2) == "1,234,567.89"`
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// USD amount, `$` prefixed.
/// - Sub-dollar prices keep `decimals` so small STARS prices stay readable
/// - Larger amounts use 2 decimals
pub fn format_usd(price: f64, decimals: usize) -> String {
    if price == 0.0 {
        return "$0.00".to_string();
    }
    let decimals = if price.abs() >= 1.0 { 2 } else { decimals };
    format!("${}", format_grouped(price, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(100_000.0, 0), "100,000");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(-45_000.5, 1), "-45,000.5");
        assert_eq!(format_grouped(-0.0001, 2), "0.00");
        assert_eq!(format_grouped(f64::NAN, 2), "-");
    }

    #[test]
    fn usd_precision_depends_on_magnitude() {
        assert_eq!(format_usd(0.0, 6), "$0.00");
        assert_eq!(format_usd(0.0123456, 6), "$0.012346");
        assert_eq!(format_usd(1520.5, 6), "$1,520.50");
    }
}
