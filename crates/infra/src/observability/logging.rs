//! Structured logging configuration.
//!
//! Installs a global `tracing-subscriber` with an `EnvFilter` read from
//! `RUST_LOG`, falling back to the configured default level.
//!
//! ```ignore
//! use forcelink_infra::observability::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::json());
//! ```

use tracing::Level;
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Configuration for structured logging.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// JSON lines (true) or human readable text (false)
    pub json_format: bool,
    /// Level used when `RUST_LOG` is not set
    pub default_level: Level,
    /// Emit span close events, which carry batch timings
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { json_format: false, default_level: Level::INFO, include_spans: false }
    }
}

impl LoggingConfig {
    pub fn json() -> Self {
        Self { json_format: true, ..Default::default() }
    }

    pub fn text() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_spans(mut self) -> Self {
        self.include_spans = true;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_level.to_string()))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber.
///
/// Returns `false` if a global subscriber was already set, in which case the
/// existing one is kept.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.filter());

    let installed = if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_span_events(config.span_events())
            .with_current_span(true)
            .with_target(true);
        tracing::subscriber::set_global_default(registry.with(layer)).is_ok()
    } else {
        let layer = fmt::layer().with_span_events(config.span_events()).with_target(true);
        tracing::subscriber::set_global_default(registry.with(layer)).is_ok()
    };

    if installed {
        tracing::debug!(json = config.json_format, level = %config.default_level, "Logging initialised");
    }
    installed
}
