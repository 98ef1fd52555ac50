#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod constants;
mod controller;
mod data;
mod error;
mod loader;
mod render;
mod state;
mod ui;
mod widgets;

use app::SurveyLens;
use config::DashboardConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(constants::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "profile-with-puffin")]
fn start_puffin_server() {
    puffin::set_scopes_on(true);
    let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&addr) {
        Ok(server) => {
            tracing::info!(%addr, "puffin server listening");
            // Must outlive main
            std::mem::forget(server);
        }
        Err(e) => tracing::error!(error = %e, "failed to start puffin server"),
    }
}

fn main() -> eframe::Result {
    init_tracing();
    #[cfg(feature = "profile-with-puffin")]
    start_puffin_server();

    let mut config = DashboardConfig::load_or_default(Path::new(constants::config::CONFIG_FILE));
    if let Some(path) = std::env::args_os().nth(1) {
        config.dataset_path = PathBuf::from(path);
    }

    let viewport_width = config.main_width + config.side_width + 60.0;
    let viewport_height =
        config.main_height + constants::layout::STATUS_PANEL_HEIGHT + 80.0;
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([viewport_width, viewport_height])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Survey Lens - Social Media & Mental Health",
        options,
        Box::new(|_| Ok(Box::new(SurveyLens::new(config)))),
    );
    if let Err(e) = &result {
        tracing::error!(error = %e, "application exited with an error");
    }
    result
}
