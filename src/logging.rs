use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "TMLGEN_LOG";

pub const DEFAULT_FILTER: &str = "info";

/// Filter built from `TMLGEN_LOG`, falling back to `info` when unset or invalid.
pub fn filter_from_env() -> EnvFilter {
    let directives = env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Logs go to stderr so stdout only carries
/// the run summary. Calling it twice is harmless.
pub fn init_logger() {
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter_from_env())
        .try_init();
}
