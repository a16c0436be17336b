use tracing_subscriber::{EnvFilter, fmt};

/// Installs the stderr log subscriber used by the binaries.
///
/// `RUST_LOG` controls the level, defaulting to `warn`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore the error if a subscriber is already installed
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
