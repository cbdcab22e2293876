//! Diagnostic logging.
//!
//! Diagnostics go to stderr through `tracing`; operator-facing status lines
//! are written by [`crate::console`] and never pass through here. `RUST_LOG`
//! takes precedence over the configured level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Level used when the configured directive cannot be parsed.
pub const FALLBACK_LEVEL: &str = "warn";

/// Build the filter for `level`, falling back to [`FALLBACK_LEVEL`] when the
/// directive is malformed.
#[must_use]
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level.trim()).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

/// Install the global subscriber.
///
/// A second call in the same process leaves the first subscriber in place.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(&config.level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(false);

    if tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("subscriber already installed");
    }
}
