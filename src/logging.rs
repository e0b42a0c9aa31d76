//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `EXPERTROW_LOG=debug`.
pub const LOG_ENV: &str = "EXPERTROW_LOG";

/// Install a formatting subscriber filtered by [`LOG_ENV`] (default `warn`).
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
