//! Application entry point for the DLA viewer.
//!
//! This binary sets up tracing and eframe/egui and delegates all interactive
//! logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dla_view=info,dla_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    eframe::run_native(
        "Diffusion-Limited Aggregation",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(Viewer::new()?))),
    )
}
