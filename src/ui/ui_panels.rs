use eframe::egui::{Button, DragValue, Grid, Ui};
use strum::IntoEnumIterator;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{AMOUNT_RANGE, FEE_RANGE, FEED};
use crate::domain::simulation::format_asset_pair;
use crate::domain::{DurationBucket, RunSettings, Weight};
use crate::engine::ChartSyncEngine;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{
    colored_subsection_heading, format_grouped, format_usd, section_heading, spaced_separator,
};

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug)]
pub enum SettingsEvent {
    Changed(RunSettings),
    Run,
    Share,
}

/// The run settings form plus its Run and Share actions.
pub struct SettingsPanel {
    settings: RunSettings,
    quote_price: Option<f64>,
    can_run: bool,
    share_copied: bool,
}

impl SettingsPanel {
    pub fn new(
        settings: RunSettings,
        quote_price: Option<f64>,
        can_run: bool,
        share_copied: bool,
    ) -> Self {
        Self {
            settings,
            quote_price,
            can_run,
            share_copied,
        }
    }

    fn render_weight(ui: &mut Ui, heading: &str, weight: &mut Weight, show_share: bool) -> bool {
        let mut changed = false;
        let (stars_pct, osmo_pct) = weight.share_pct();

        ui.add_space(5.0);
        ui.label(colored_subsection_heading(heading));
        Grid::new(heading).num_columns(3).show(ui, |ui| {
            ui.label_subdued(UI_TEXT.stars_label);
            changed |= ui
                .add(
                    DragValue::new(&mut weight.stars)
                        .speed(1.0)
                        .range(AMOUNT_RANGE),
                )
                .changed();
            if show_share {
                ui.label_share(stars_pct, UI_CONFIG.colors.stars_share);
            }
            ui.end_row();

            ui.label_subdued(UI_TEXT.osmo_label);
            changed |= ui
                .add(
                    DragValue::new(&mut weight.osmo)
                        .speed(1.0)
                        .range(AMOUNT_RANGE),
                )
                .changed();
            if show_share {
                ui.label_share(osmo_pct, UI_CONFIG.colors.osmo_share);
            }
            ui.end_row();
        });

        changed
    }

    fn render_duration(&mut self, ui: &mut Ui) -> bool {
        let previous = self.settings.duration;

        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.duration_heading));
        ui.horizontal(|ui| {
            for bucket in DurationBucket::iter() {
                ui.selectable_value(&mut self.settings.duration, bucket, bucket.name());
            }
        });

        self.settings.duration != previous
    }

    fn render_volume(&mut self, ui: &mut Ui) -> bool {
        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.volume_heading));
        ui.add(
            DragValue::new(&mut self.settings.volume)
                .speed(100.0)
                .range(AMOUNT_RANGE)
                .prefix("$"),
        )
        .changed()
    }

    fn render_fees(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;

        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.fees_heading));
        Grid::new("fees_grid").num_columns(2).show(ui, |ui| {
            ui.label_subdued(UI_TEXT.swap_fee_label);
            changed |= ui
                .add(
                    DragValue::new(&mut self.settings.fees.swap)
                        .speed(0.001)
                        .range(FEE_RANGE)
                        .max_decimals(4),
                )
                .changed();
            ui.end_row();

            ui.label_subdued(UI_TEXT.exit_fee_label);
            changed |= ui
                .add(
                    DragValue::new(&mut self.settings.fees.exit)
                        .speed(0.001)
                        .range(FEE_RANGE)
                        .max_decimals(4),
                )
                .changed();
            ui.end_row();
        });

        changed
    }

    fn render_actions(&mut self, ui: &mut Ui) -> Vec<SettingsEvent> {
        let mut events = Vec::new();

        ui.horizontal(|ui| {
            let run = ui
                .add_enabled(self.can_run, Button::new(UI_TEXT.run_button))
                .on_disabled_hover_text(UI_TEXT.run_disabled_hint);
            if run.clicked() {
                events.push(SettingsEvent::Run);
            }

            if ui.button(UI_TEXT.share_button).clicked() {
                events.push(SettingsEvent::Share);
            }
            if self.share_copied {
                ui.label_warning(UI_TEXT.share_copied);
            }
        });

        let price = match self.quote_price {
            Some(price) => format_usd(price, 4),
            None => UI_TEXT.price_waiting.to_string(),
        };
        ui.label_subdued(format!("{}: {}", FEED.quote_symbol, price));

        events
    }
}

impl Panel for SettingsPanel {
    type Event = SettingsEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<SettingsEvent> {
        let before = self.settings;

        section_heading(ui, UI_TEXT.settings_heading);

        let settings = &mut self.settings;
        Self::render_weight(
            ui,
            UI_TEXT.initial_weight_heading,
            &mut settings.initial_weight,
            true,
        );
        Self::render_weight(ui, UI_TEXT.end_weight_heading, &mut settings.end_weight, true);
        Self::render_weight(ui, UI_TEXT.deposit_heading, &mut settings.deposit, false);
        self.render_duration(ui);
        self.render_volume(ui);
        self.render_fees(ui);

        spaced_separator(ui);

        let mut events = Vec::new();
        if self.settings != before {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Settings edited: {:?}", self.settings);
            }
            events.push(SettingsEvent::Changed(self.settings));
        }
        events.extend(self.render_actions(ui));
        events
    }
}

/// Read-only summary of the last simulation and the hovered point.
pub struct SimulationInfoPanel<'a> {
    engine: &'a ChartSyncEngine,
}

impl<'a> SimulationInfoPanel<'a> {
    pub fn new(engine: &'a ChartSyncEngine) -> Self {
        Self { engine }
    }

    pub fn render(&self, ui: &mut Ui) {
        let engine = self.engine;
        let quote = engine.external_price();
        let symbol = FEED.quote_symbol;

        section_heading(ui, UI_TEXT.info_heading);

        Grid::new("simulation_info")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                if let Some(series) = engine.series() {
                    ui.info_row(
                        UI_TEXT.daily_volume,
                        &format!("{} {}", format_grouped(series.daily_volume, 0), symbol),
                    );
                    ui.info_row(
                        UI_TEXT.total_volume,
                        &format!("{} {}", format_grouped(series.total_volume, 0), symbol),
                    );
                    ui.info_row(UI_TEXT.total_buys, &series.total_buys.to_string());
                }

                ui.info_row(UI_TEXT.osmo_price, &format_usd(quote, 4));

                if let Some(series) = engine.series() {
                    ui.info_row(UI_TEXT.start_price, &format_usd(series.start_price(quote), 6));
                    ui.info_row(UI_TEXT.end_price, &format_usd(series.end_price(quote), 6));
                    ui.info_row(
                        UI_TEXT.initial_assets,
                        &format_asset_pair(&series.initial_assets).unwrap_or_else(|| "-".into()),
                    );
                    ui.info_row(
                        UI_TEXT.end_assets,
                        &format_asset_pair(&series.end_assets).unwrap_or_else(|| "-".into()),
                    );
                }

                let hover = engine.hover();
                ui.info_row(UI_TEXT.date_time, &hover.date);
                ui.info_row(
                    UI_TEXT.exchange_rate,
                    &format!("1 STARS = {} {}", hover.price, symbol),
                );
                ui.info_row(UI_TEXT.stars_price, &format_usd(engine.derived_price(), 6));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, parse_query_string};
    use eframe::egui;

    fn render_frames(settings: RunSettings, frames: usize) -> Vec<SettingsEvent> {
        let ctx = egui::Context::default();
        let mut panel = SettingsPanel::new(settings, Some(0.5), true, false);
        let mut events = Vec::new();
        for _ in 0..frames {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    events.extend(panel.render(ui));
                });
            });
        }
        events
    }

    #[test]
    fn decoded_shared_settings_are_not_rewritten_by_the_form() {
        let query = parse_query_string(
            "duration=3d&fees=0,1&initial_weight=0,1000000000000000&end_weight=20,20&volume=0",
        );
        let settings = decode(&query).unwrap();

        let changed: Vec<_> = render_frames(settings, 2)
            .into_iter()
            .filter(|e| matches!(e, SettingsEvent::Changed(_)))
            .collect();
        assert!(changed.is_empty(), "form altered settings: {:?}", changed);
    }

    #[test]
    fn idle_form_emits_no_events() {
        assert!(render_frames(RunSettings::default(), 2).is_empty());
    }
}
