//! Process setup shared by every command: environment and logging.

use tracing_subscriber::EnvFilter;

/// Load a `.env` file from the working directory, if there is one.
///
/// Must run before argument parsing so its values act as environment
/// fallbacks for flags.
pub fn load_env() {
    if let Ok(path) = dotenvy::dotenv() {
        // Logging is not up yet.
        eprintln!("Loaded environment from {}", path.display());
    }
}

/// Default filter directive when `RUST_LOG` is not set.
#[must_use]
pub const fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Initialize the tracing subscriber. Logs go to stderr so `ask` can keep
/// stdout for the reply alone.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
