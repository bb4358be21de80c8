//! Utility functions used by the binary

use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("mapcompose-debug.log");
    path
}

/// Send tracing output to the debug log file.
///
/// The terminal belongs to the UI, so without `--debug` nothing is
/// installed and events are dropped. `RUST_LOG` overrides the filter.
pub fn init_tracing(debug: bool) {
    if !debug {
        return;
    }

    let path = get_debug_log_path();
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) else {
        eprintln!("Warning: Failed to open log file: {}", path.display());
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mapcompose=debug"));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
