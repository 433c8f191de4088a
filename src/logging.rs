//! Tracing/logging initialization
//!
//! Diagnostics go to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize tracing for the process
///
/// `RUST_LOG` wins over `verbosity` when set. Safe to call more than once;
/// later calls are no-ops.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
