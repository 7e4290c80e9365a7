mod app;
mod config;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::CuratorApp;
use clap::Parser;
use config::{CliArgs, CuratorConfig};
use eframe::egui;
use state::CuratorState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CuratorConfig::resolve(CliArgs::parse())?;
    // Count mismatches fail here, before any window exists.
    let state = CuratorState::open(&config).context("opening dataset")?;

    if state.is_empty() {
        log::info!(
            "No image/mask pairs in {} and {}, nothing to review",
            config.image_folder.display(),
            config.mask_folder.display()
        );
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 560.0])
            .with_min_inner_size([500.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mask Curator",
        options,
        Box::new(|_cc| Ok(Box::new(CuratorApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
