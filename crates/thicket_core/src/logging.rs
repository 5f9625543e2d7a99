//! Structured logging setup.
//!
//! Installs a `tracing_subscriber::fmt` subscriber so scheduler activity
//! (test start/end, run counts, failure classification) is observable
//! without the lower layers depending on any particular reporter format.

use tracing_subscriber::EnvFilter;

const ENV_VAR: &str = "THICKET_LOG";

/// Installs the default subscriber.
///
/// `verbose` picks the fallback filter level used when `THICKET_LOG` is
/// unset; the environment variable always wins when present. Idempotent: a
/// second call in the same process does not panic, it just logs that a
/// subscriber is already installed.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "thicket=debug" } else { "thicket=info" };
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("thicket_core::logging::init called more than once; keeping the existing subscriber");
    }
}
