//! Logging initialization.
//!
//! The library itself only emits `tracing` events and `metrics` counters;
//! binaries decide where they go. Without a metrics recorder installed the
//! counters are no-ops, which keeps instrumentation free for library users
//! who do not care.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise `info` (or `debug`
/// with `verbose`). Logs go to stderr so command output stays clean on
/// stdout. Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "wikihop=debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
