//! Tracing/logging initialization.

use crate::config::Environment;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber for `env`.
///
/// Logs go to stderr; stdout carries responses. `RUST_LOG` overrides the
/// environment's default level. Subsequent calls are no-ops.
pub fn init(env: Environment) {
    let default_level = match env {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed.
    match env {
        Environment::Local => builder.try_init().ok(),
        Environment::Dev | Environment::Prod => builder.json().try_init().ok(),
    };
}
