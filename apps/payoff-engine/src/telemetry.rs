//! Logging setup.
//!
//! Installs a `tracing-subscriber` formatter driven by [`LoggingConfig`].
//! `RUST_LOG` overrides the configured level when set.
//!
//! # Usage
//!
//! ```rust,ignore
//! use payoff_engine::telemetry::init_logging;
//!
//! let config = payoff_engine::config::load_config_from_env()?;
//! init_logging(&config.observability.logging);
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` if set, otherwise the configured level.
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for command output. Calling
/// this more than once is harmless; later calls leave the first subscriber
/// in place.
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_filter(config);
    let span_events = if config.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let result = if config.format == "pretty" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_span_events(span_events)
            .with_writer(std::io::stderr)
            .pretty()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_span_events(span_events)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(config.include_spans)
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
        return;
    }

    tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
}
