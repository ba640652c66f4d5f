//! Crime Dashboard - CSV Crime Statistics & Interactive Chart Viewer
//!
//! A Rust application for exploring pre-aggregated crime statistics.

use anyhow::Result;
use crime_dashboard::data::cache;
use crime_dashboard::gui::DashboardApp;
use crime_dashboard::DashboardConfig;
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = DashboardConfig::load()?;
    info!(data_dir = %config.data_dir.display(), top_n = config.top_n, "startup");

    // Load once before the window opens; every view reads the cached outcome
    let dataset = cache::init_global(config.data_dir.clone());
    if let Err(failure) = dataset.get() {
        warn!("{}", failure);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Crime Data Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Crime Data Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dataset, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}
