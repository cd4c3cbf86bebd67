//! Wages Dashboard - Interactive view over informal sector average daily wages
//!
//! Loads the wide wage CSV once at startup, then filters, summarizes and
//! charts it as the user changes the category and year selection.

mod charts;
mod config;
mod data;
mod export;
mod gui;
mod stats;
mod views;

use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use gui::WagesApp;
use std::path::Path;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    let title = config.title.clone();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title(&title),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(WagesApp::new(cc, config)))),
    )
}
