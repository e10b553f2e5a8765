//! Tracing subscriber setup.

use super::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber when debug mode is on.
///
/// The filter comes from `RUST_LOG`; with only `FOCUSFLOW_DEBUG` set it
/// defaults to debug level for this crate. Outside debug mode nothing is
/// installed and messages go straight to the terminal.
pub fn init() {
    if !is_debug_mode() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME").replace('-', "_"))));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
