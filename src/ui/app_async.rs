use eframe::egui;
use poll_promise::Promise;
use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{SimulateRequest, SubmitError};
use crate::domain::SimulationResponse;
use crate::engine::ChartInput;
use crate::ui::app::{AppError, LbpSimulatorApp};

impl LbpSimulatorApp {
    /// Submit the current settings. One simulation at a time.
    pub(super) fn start_simulation(&mut self, ctx: &egui::Context) {
        if self.simulation_promise.is_some() {
            return;
        }

        let quote_price = self.price_feed.price();
        let request = match SimulateRequest::from_settings(&self.settings, quote_price) {
            Ok(request) => request,
            Err(e) => {
                self.last_error = Some(AppError::Submit(e));
                return;
            }
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Run pressed: {:?}", request);
        }

        let client = Arc::clone(&self.simulation_client);
        let repaint_ctx = ctx.clone();
        let (sender, promise) = Promise::new();
        self.runtime.spawn(async move {
            let result = client.submit(&request).await;
            sender.send(result);
            repaint_ctx.request_repaint();
        });

        self.simulation_promise = Some(promise);
        self.last_error = None;
    }

    pub(super) fn poll_simulation(&mut self) {
        let Some(promise) = self.simulation_promise.take() else {
            return;
        };
        match promise.try_take() {
            Ok(result) => self.apply_simulation_result(result),
            Err(pending) => self.simulation_promise = Some(pending),
        }
    }

    /// A failed run leaves the chart on its last good series.
    fn apply_simulation_result(&mut self, result: Result<SimulationResponse, SubmitError>) {
        match result {
            Ok(response) => {
                log::info!(
                    "Simulation finished: {} points, {} buys",
                    response.data.len(),
                    response.total_buys
                );
                if let Some(chart) = self.chart.as_mut() {
                    chart.apply(ChartInput::SimulationArrived(Arc::new(response)));
                }
                self.plot_view.series_replaced();
                self.last_error = None;
            }
            Err(e) => {
                log::warn!("Simulation failed: {}", e);
                self.last_error = Some(AppError::Submit(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PriceSource, SimulationClient};
    use crate::domain::{PricePoint, RunSettings};
    use crate::ui::app::AppServices;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedPrice;

    #[async_trait]
    impl PriceSource for FixedPrice {
        async fn fetch_price(&self) -> anyhow::Result<f64> {
            Ok(0.5)
        }

        fn signature(&self) -> &'static str {
            "fixed"
        }
    }

    /// Answers each submit with the next queued result.
    struct QueuedClient {
        results: Mutex<VecDeque<Result<SimulationResponse, SubmitError>>>,
    }

    #[async_trait]
    impl SimulationClient for QueuedClient {
        async fn submit(
            &self,
            _request: &SimulateRequest,
        ) -> Result<SimulationResponse, SubmitError> {
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SubmitError::Transport("queue empty".into())))
        }
    }

    fn app(results: Vec<Result<SimulationResponse, SubmitError>>) -> LbpSimulatorApp {
        LbpSimulatorApp::with_settings(
            RunSettings::default(),
            None,
            AppServices {
                runtime: tokio::runtime::Handle::current(),
                simulation_client: Arc::new(QueuedClient {
                    results: Mutex::new(results.into()),
                }),
                price_source: Arc::new(FixedPrice),
                poll_interval: Duration::from_secs(60),
                share_base_url: "https://lbp.example".into(),
            },
        )
    }

    async fn wait_for_price(app: &LbpSimulatorApp) {
        for _ in 0..200 {
            if app.price_feed.price().is_some() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no external price");
    }

    async fn run_once(app: &mut LbpSimulatorApp, ctx: &egui::Context) {
        app.start_simulation(ctx);
        assert!(app.is_running(), "run did not start: {:?}", app.last_error);
        for _ in 0..200 {
            app.poll_simulation();
            if !app.is_running() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("simulation never finished");
    }

    #[tokio::test]
    async fn failed_run_keeps_last_good_series() {
        let first = SimulationResponse {
            total_buys: 3,
            data: vec![
                PricePoint { time: 0, value: 1.0 },
                PricePoint { time: 3600, value: 2.0 },
            ],
            ..Default::default()
        };
        let mut app = app(vec![Ok(first.clone()), Err(SubmitError::Status(500))]);
        let ctx = egui::Context::default();
        wait_for_price(&app).await;

        run_once(&mut app, &ctx).await;
        assert!(app.last_error.is_none());
        assert_eq!(app.chart.as_ref().and_then(|c| c.series()), Some(&first));

        run_once(&mut app, &ctx).await;
        assert_eq!(app.chart.as_ref().and_then(|c| c.series()), Some(&first));
        assert!(matches!(
            app.last_error,
            Some(AppError::Submit(SubmitError::Status(500)))
        ));
    }

    #[tokio::test]
    async fn successful_run_clears_previous_error() {
        let mut app = app(vec![
            Err(SubmitError::Transport("refused".into())),
            Ok(SimulationResponse::default()),
        ]);
        let ctx = egui::Context::default();
        wait_for_price(&app).await;

        run_once(&mut app, &ctx).await;
        assert!(matches!(app.last_error, Some(AppError::Submit(_))));

        run_once(&mut app, &ctx).await;
        assert!(app.last_error.is_none());
        assert!(app.chart.as_ref().is_some_and(|c| c.series().is_some()));
    }
}
