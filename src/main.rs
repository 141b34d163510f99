#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use eframe::NativeOptions;
use std::path::PathBuf;
use tokio::runtime::Runtime;

use lbp_simulator::{Cli, run_app};

const APP_STATE_PATH: &str = "lbp_simulator_state.json";

fn main() -> eframe::Result {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Network runtime, alive for the whole UI session
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let handle = rt.handle().clone();

    // D. Run Native App
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    eframe::run_native(
        "LBP Simulator",
        options,
        Box::new(move |cc| Ok(run_app(cc, &args, handle)?)),
    )
}
