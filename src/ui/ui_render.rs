use eframe::egui::{CentralPanel, Color32, Context, Frame, RichText, ScrollArea, SidePanel, Ui};

use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{Panel, SettingsEvent, SettingsPanel, SimulationInfoPanel};

use super::app::LbpSimulatorApp;

impl LbpSimulatorApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new().fill(UI_CONFIG.colors.side_panel);
        SidePanel::left("settings_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let mut panel = SettingsPanel::new(
                    self.settings,
                    self.price_feed.price(),
                    self.can_run(),
                    self.share_copied(),
                );

                let events = ScrollArea::vertical()
                    .id_salt("settings_scroll")
                    .show(ui, |ui| panel.render(ui))
                    .inner;

                for event in events {
                    match event {
                        SettingsEvent::Changed(settings) => self.settings = settings,
                        SettingsEvent::Run => self.start_simulation(ctx),
                        SettingsEvent::Share => self.copy_share_link(ctx),
                    }
                }
            });
    }

    pub(super) fn render_info_panel(&mut self, ctx: &Context) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        let info_frame = Frame::new().fill(UI_CONFIG.colors.side_panel);
        SidePanel::right("info_panel")
            .min_width(UI_CONFIG.info_panel_min_width)
            .frame(info_frame)
            .show(ctx, |ui| {
                SimulationInfoPanel::new(chart).render(ui);
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new().fill(UI_CONFIG.colors.central_panel);
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.label_header(UI_TEXT.app_title);

                self.render_banners(ui);

                let running = self.is_running();
                let series = self
                    .chart
                    .as_ref()
                    .and_then(|chart| chart.series())
                    .filter(|series| !series.data.is_empty());

                match (series, self.chart.as_ref()) {
                    (Some(series), Some(chart)) => {
                        if running {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label_subdued(UI_TEXT.running_heading);
                            });
                        }
                        let hovered = chart.hover_time().map(|time| (time, chart.hover().value));
                        self.plot_view.show(ui, series, hovered);
                    }
                    _ if running => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.spinner();
                            ui.add_space(12.0);
                            ui.heading(UI_TEXT.running_heading);
                        });
                    }
                    _ => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.heading(UI_TEXT.empty_chart_heading);
                            ui.add_space(6.0);
                            ui.label(
                                RichText::new(UI_TEXT.empty_chart_hint)
                                    .color(Color32::from_gray(190)),
                            );
                        });
                    }
                }
            });
    }

    /// Decode warning (dismissible) and the last recoverable error.
    fn render_banners(&mut self, ui: &mut Ui) {
        if let Some(warning) = &self.decode_warning {
            let mut dismissed = false;
            ui.horizontal(|ui| {
                ui.label_warning(format!("{}: {}", UI_TEXT.decode_warning_prefix, warning));
                dismissed = ui.small_button(UI_TEXT.dismiss).clicked();
            });
            if dismissed {
                self.decode_warning = None;
            }
        }

        if let Some(error) = &self.last_error {
            ui.label_error(format!("⚠ {}", error));
        }
        ui.add_space(6.0);
    }
}
