//! greencalc - a green desktop calculator
//!
//! Mouse and keyboard driven; four operations, percent, sign flip and an
//! about window.

mod about;
mod app;
mod build_info;
mod config;
mod engine;
mod format;
mod token;

use app::CalcApp;
use config::{CalcConfig, MIN_WINDOW_SIZE};
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    let path = CalcConfig::path();
    let loaded = CalcConfig::try_load(&path);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => CalcConfig::default(),
    }
    .with_env(|key| std::env::var(key).ok());

    greencore::logging::init(config.log_filter.as_deref());
    match loaded {
        Ok(Some(_)) => tracing::info!(path = %path.display(), "loaded config"),
        Ok(None) => tracing::debug!(path = %path.display(), "no config file, using defaults"),
        Err(err) => tracing::warn!(%err, "ignoring unreadable config"),
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting greencalc");

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.window_width, config.window_height])
        .with_min_inner_size(MIN_WINDOW_SIZE)
        .with_title("Calculator")
        .with_decorations(config.decorated);
    if config.always_on_top {
        viewport = viewport.with_window_level(egui::WindowLevel::AlwaysOnTop);
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "greencalc",
        options,
        Box::new(move |cc| {
            greencore::GreenTheme::default().apply(&cc.egui_ctx);
            Box::new(CalcApp::new(cc, &config))
        }),
    )
}
