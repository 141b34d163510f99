#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod codec;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use codec::{DecodeError, QueryMap, decode, encode};
pub use data::{HttpPriceSource, HttpSimulationClient, PriceFeedPoller};
pub use domain::{RunSettings, SimulationResponse};
pub use engine::ChartSyncEngine;
pub use ui::LbpSimulatorApp;

use std::sync::Arc;
use std::time::Duration;

// CLI argument parsing
use clap::{Parser, ValueEnum};

use crate::config::{FEED, QuoteSchema, SIMULATION};
use crate::ui::AppServices;

/// Shape of the quote endpoint's JSON body
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSchemaArg {
    /// `{ "price": <number> }`
    Flat,
    /// `{ "<asset>": { "usd": <number> } }`
    Keyed,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Share link or query string to load settings from
    #[arg(long)]
    pub query: Option<String>,

    /// Base URL of the simulation service
    #[arg(long, default_value = SIMULATION.api_base_url)]
    pub api_base: String,

    /// Quote endpoint polled for the external price
    #[arg(long, default_value = FEED.quote_url)]
    pub price_url: String,

    #[arg(long, value_enum, default_value_t = PriceSchemaArg::Flat)]
    pub price_schema: PriceSchemaArg,

    /// Asset key for the keyed schema
    #[arg(long, default_value = FEED.keyed_asset)]
    pub price_asset: String,

    /// Price poll interval in milliseconds
    #[arg(long, default_value_t = FEED.poll_interval_ms)]
    pub poll_interval_ms: u64,
}

impl Cli {
    pub fn quote_schema(&self) -> QuoteSchema {
        match self.price_schema {
            PriceSchemaArg::Flat => QuoteSchema::Flat,
            PriceSchemaArg::Keyed => QuoteSchema::Keyed {
                asset: self.price_asset.clone(),
            },
        }
    }

    pub fn launch_query(&self) -> Option<QueryMap> {
        self.query.as_deref().map(codec::parse_query_string)
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    args: &Cli,
    runtime: tokio::runtime::Handle,
) -> anyhow::Result<Box<dyn eframe::App>> {
    let services = AppServices {
        runtime,
        simulation_client: Arc::new(HttpSimulationClient::new(&args.api_base)?),
        price_source: Arc::new(HttpPriceSource::new(
            args.price_url.clone(),
            args.quote_schema(),
        )?),
        poll_interval: Duration::from_millis(args.poll_interval_ms.max(1)),
        share_base_url: SIMULATION.share_base_url.to_string(),
    };

    let app = LbpSimulatorApp::new(cc, services, args.launch_query());
    Ok(Box::new(app))
}
