//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after the config is assembled.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Directives appended to `HANGAR_LOG_LEVEL` so the HTTP client stack stays
/// quiet at `debug`/`trace`.
const QUIET_DEPS: &str = "hyper_util=warn,reqwest=warn";

/// Install the global subscriber, writing to stderr.
pub fn init(level: &str) -> Result<(), AppError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(level, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Pick the effective filter.
///
/// A non-empty, parseable `RUST_LOG` is used as-is. Otherwise `level` (a bare
/// level or directive list from `HANGAR_LOG_LEVEL`) is combined with
/// [`QUIET_DEPS`].
pub fn build_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter, AppError> {
    if let Some(filter) = rust_log.filter(|d| !d.is_empty()).and_then(|d| EnvFilter::try_new(d).ok()) {
        return Ok(filter);
    }

    let directives = format!("{level},{QUIET_DEPS}");
    EnvFilter::try_new(&directives)
        .map_err(|e| AppError::Logger(format!("invalid HANGAR_LOG_LEVEL '{level}': {e}")))
}
