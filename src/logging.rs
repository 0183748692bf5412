//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The level is taken from, in order:
//! 1. the level passed to [`init_logging`];
//! 2. the `TASKGRAPH_LOG` environment variable (e.g. "info", "debug");
//! 3. `info`.
//!
//! Library code only emits events; installing a subscriber is left to the
//! embedding application.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt;

/// Environment variable consulted when no explicit level is given.
pub const LOG_ENV_VAR: &str = "TASKGRAPH_LOG";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Installs a global fmt subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`LoggingError::Install`] when a global subscriber already
/// exists.
pub fn init_logging(level: Option<Level>) -> Result<(), LoggingError> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let max_level = resolve_level(level, env_value.as_deref());

    fmt()
        .with_max_level(max_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))
}

/// Picks the effective level from an explicit choice and an environment
/// value.
#[must_use]
pub fn resolve_level(explicit: Option<Level>, env_value: Option<&str>) -> Level {
    explicit
        .or_else(|| env_value.and_then(parse_level))
        .unwrap_or(Level::INFO)
}

/// Parses a level name, ignoring case and surrounding whitespace.
#[must_use]
pub fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
