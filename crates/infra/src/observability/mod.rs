//! Observability bootstrap
//!
//! The library itself only emits `tracing` events. Binaries and tests that
//! want to see them install a subscriber through [`logging::init_logging`].

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
