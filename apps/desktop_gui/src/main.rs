mod controller;
mod ui;

use draft_core::config::load_config;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::ui::WeaveApp;

fn main() -> eframe::Result<()> {
    let config = load_config();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(path) = &config.source {
        tracing::info!(path = %path.display(), "loaded config");
    }
    for note in &config.notes {
        tracing::warn!(note = %note, "ignored config value");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Weave Draft")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([860.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Weave Draft",
        options,
        Box::new(move |_cc| Ok(Box::new(WeaveApp::new(config.settings)))),
    )
}
