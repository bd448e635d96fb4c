#![forbid(unsafe_code)]

//! Logging glue.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here so
//! downstream crates can log through `regrid_core::logging` without naming
//! the crate themselves. With `tracing-json`, [`init_json`] installs a JSON
//! subscriber filtered by an `EnvFilter` directive string.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(feature = "tracing-json")]
use std::fmt;

/// Failure to install the JSON subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub enum LoggingError {
    /// The filter directive did not parse.
    Filter(String),
    /// A global subscriber is already set.
    AlreadyInitialized(String),
}

#[cfg(feature = "tracing-json")]
impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadyInitialized(msg) => write!(f, "subscriber already set: {msg}"),
        }
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingError {}

/// Install a global JSON subscriber.
///
/// `filter` uses `EnvFilter` syntax, e.g. `"regrid_widgets=debug,info"`.
#[cfg(feature = "tracing-json")]
pub fn init_json(filter: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).map_err(|err| LoggingError::Filter(err.to_string()))?;
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingError::AlreadyInitialized(err.to_string()))
}
