#![forbid(unsafe_code)]

//! Logging bootstrap.
//!
//! Library code only emits `tracing` events and spans; it never installs a
//! subscriber. Hosts that want output can call [`init_subscriber`] (feature
//! `log-init`) once at startup. The filter is read from [`LOG_ENV_VAR`] and
//! defaults to [`DEFAULT_FILTER`].
//!
//! ```text
//! PANEFIT_LOG=panefit_layout=debug,panefit_text=trace
//! ```

/// Environment variable holding the `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "PANEFIT_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Output format for [`init_subscriber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Pretty,
    /// One JSON object per event (feature `tracing-json`).
    Json,
}

/// Install a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "log-init")]
pub fn init_subscriber(format: LogFormat) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        #[cfg(feature = "tracing-json")]
        LogFormat::Json => builder.json().try_init().is_ok(),
        #[cfg(not(feature = "tracing-json"))]
        LogFormat::Json => {
            tracing::warn!("tracing-json feature disabled; falling back to pretty output");
            builder.try_init().is_ok()
        }
        LogFormat::Pretty => builder.try_init().is_ok(),
    }
}
