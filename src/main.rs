mod config;
mod error;
mod ops;
mod playback;
mod renderer;
mod store;
mod types;
mod ui;

use gstreamer as gst;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::store::VideoStore;
use crate::store::storage::FileStorage;
use crate::store::sync::LoggingCloudSync;
use crate::ui::app::{AppState, VslApp};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vslfree=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), origin = %config.player_origin, "Starting VSL Free");

    if let Err(e) = gst::init() {
        // The dashboard still works; only the preview player is unavailable.
        tracing::warn!(error = %e, "GStreamer unavailable");
    }

    let store = VideoStore::load(
        Box::new(FileStorage::new(&config.data_dir)),
        Box::new(LoggingCloudSync::new()),
    );

    let (width, height) = config.window_size;
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("VSL Free")
            .with_inner_size([width, height]),
        ..Default::default()
    };

    let state = AppState::new(store, config);
    eframe::run_native(
        "VSL Free",
        native_options,
        Box::new(|cc| Ok(Box::new(VslApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))?;
    Ok(())
}
