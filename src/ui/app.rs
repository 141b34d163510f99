use eframe::{Frame, egui};
use poll_promise::Promise;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

use crate::codec::{DecodeError, QueryMap, decode, share_url};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::SIMULATION;
use crate::data::{PriceFeedPoller, PriceSource, SimulationClient, SubmitError};
use crate::domain::{RunSettings, SimulationResponse};
use crate::engine::{ChartInput, ChartSyncEngine, CrosshairHub, SubscribeError};
use crate::ui::config::UI_CONFIG;
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;

/// Error types for application operations
#[derive(Debug, Clone)]
pub enum AppError {
    /// The simulation could not be submitted or its answer was unusable
    Submit(SubmitError),
    /// The chart session could not acquire its cross-hair listener
    Chart(SubscribeError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Submit(e) => write!(f, "{}", e),
            AppError::Chart(e) => write!(f, "Chart unavailable: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

/// Everything the app talks to outside the UI thread.
pub struct AppServices {
    pub runtime: Handle,
    pub simulation_client: Arc<dyn SimulationClient>,
    pub price_source: Arc<dyn PriceSource>,
    pub poll_interval: Duration,
    pub share_base_url: String,
}

pub struct LbpSimulatorApp {
    /// Form state, persisted between launches
    pub(super) settings: RunSettings,

    pub(super) runtime: Handle,
    pub(super) simulation_client: Arc<dyn SimulationClient>,
    pub(super) price_feed: PriceFeedPoller,

    // Chart session: the plot surface and the engine listening to it
    pub(super) plot_view: PlotView,
    pub(super) chart: Option<ChartSyncEngine>,

    pub(super) simulation_promise: Option<Promise<Result<SimulationResponse, SubmitError>>>,
    pub(super) last_error: Option<AppError>,
    pub(super) decode_warning: Option<DecodeError>,
    pub(super) share_copied_at: Option<Instant>,
    pub(super) share_base_url: String,
}

/// Launch settings: a decodable launch query wins, then persisted settings,
/// then defaults. A query that fails to decode is reported and ignored.
pub fn resolve_launch_settings(
    query: Option<&QueryMap>,
    persisted: Option<RunSettings>,
) -> (RunSettings, Option<DecodeError>) {
    let fallback = persisted.unwrap_or_default();
    match query.filter(|q| !q.is_empty()) {
        Some(query) => match decode(query) {
            Ok(settings) => (settings, None),
            Err(e) => (fallback, Some(e)),
        },
        None => (fallback, None),
    }
}

impl LbpSimulatorApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        services: AppServices,
        launch_query: Option<QueryMap>,
    ) -> Self {
        // Attempt to load the persisted state
        let persisted: Option<RunSettings> = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY));

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_state_serde {
            match &persisted {
                Some(settings) => log::info!("Loaded persisted settings: {:?}", settings),
                None => log::info!("No persisted settings, starting from defaults"),
            }
        }

        let (settings, decode_warning) =
            resolve_launch_settings(launch_query.as_ref(), persisted);
        if let Some(err) = &decode_warning {
            log::warn!("Ignoring launch query: {}", err);
        }

        Self::with_settings(settings, decode_warning, services)
    }

    pub fn with_settings(
        settings: RunSettings,
        decode_warning: Option<DecodeError>,
        services: AppServices,
    ) -> Self {
        let hub = CrosshairHub::new();
        let (chart, last_error) = match ChartSyncEngine::new(&hub) {
            Ok(engine) => (Some(engine), None),
            Err(e) => {
                log::error!("Could not start chart session: {}", e);
                (None, Some(AppError::Chart(e)))
            }
        };

        let price_feed = PriceFeedPoller::start(
            services.poll_interval,
            services.price_source,
            &services.runtime,
        );

        Self {
            settings,
            runtime: services.runtime,
            simulation_client: services.simulation_client,
            price_feed,
            plot_view: PlotView::new(hub),
            chart,
            simulation_promise: None,
            last_error,
            decode_warning,
            share_copied_at: None,
            share_base_url: services.share_base_url,
        }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub(super) fn is_running(&self) -> bool {
        self.simulation_promise.is_some()
    }

    /// Running needs a positive external price to convert the USD volume.
    pub(super) fn can_run(&self) -> bool {
        self.chart.is_some() && !self.is_running() && self.price_feed.price().is_some()
    }

    pub(super) fn share_copied(&self) -> bool {
        self.share_copied_at.is_some_and(|at| {
            at.elapsed() < Duration::from_millis(SIMULATION.share_confirmation_ms)
        })
    }

    pub(super) fn copy_share_link(&mut self, ctx: &egui::Context) {
        let url = share_url(&self.share_base_url, &self.settings);
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Share link copied: {}", url);
        }
        ctx.copy_text(url);
        self.share_copied_at = Some(Instant::now());
        ctx.request_repaint_after(Duration::from_millis(SIMULATION.share_confirmation_ms));
    }

    /// Forward the newest committed external price to the chart session.
    pub(super) fn sync_external_price(&mut self) {
        if let (Some(chart), Some(sample)) = (self.chart.as_mut(), self.price_feed.latest()) {
            chart.apply(ChartInput::PriceUpdated(sample));
        }
    }

    /// Tear down the chart session and the price feed.
    fn shutdown(&mut self) {
        self.simulation_promise = None;
        self.price_feed.stop();
        self.chart = None;
    }
}

impl eframe::App for LbpSimulatorApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.sync_external_price();
        self.poll_simulation();

        self.render_side_panel(ctx);
        self.render_info_panel(ctx);
        self.render_central_panel(ctx);

        // Events published by the plot this frame
        if let Some(chart) = self.chart.as_mut() {
            if chart.pump() {
                ctx.request_repaint();
            }
        }

        ctx.request_repaint_after(Duration::from_secs(UI_CONFIG.idle_repaint_secs));
    }
}
