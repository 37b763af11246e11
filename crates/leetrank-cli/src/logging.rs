//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter: warnings and errors only, so console output stays readable.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global subscriber. `RUST_LOG` wins over `level`.
///
/// Logs go to stderr; stdout is reserved for command output.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
