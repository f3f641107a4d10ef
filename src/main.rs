mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::BikeCountsApp;
use clap::Parser;
use config::{Args, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = DashboardConfig::load(args.config.as_deref())?;

    let mut state = AppState::new(config.clone());
    if args.data_dir.is_dir() {
        state.load_dir(&args.data_dir);
    } else {
        log::warn!("Data directory {} not found", args.data_dir.display());
        state.status_message = Some(format!(
            "No data directory at {} (File → Open…)",
            args.data_dir.display()
        ));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NYC Biking Data",
        options,
        Box::new(|_cc| Ok(Box::new(BikeCountsApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard: {e}"))
}
