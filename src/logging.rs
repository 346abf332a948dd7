//
// logging.rs
// Toolsuite-rs
//
// Tracing subscriber setup: env-driven filter, formatted events on stderr.
//
// Thales Matheus Mendonça Santos - November 2025

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Env var holding a tracing filter for the suite, e.g. `TOOLSUITE_LOG=debug`.
pub const LOG_ENV: &str = "TOOLSUITE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter: `TOOLSUITE_LOG`, then `RUST_LOG`, then `warn`.
fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// help, version, and tool output. Calling this twice is harmless.
pub fn init() {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    if tracing_subscriber::registry()
        .with(filter())
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::trace!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init();
        init();
        tracing::info!("logging initialised");
    }
}
