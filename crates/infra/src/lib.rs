//! # ForceLink Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed `HttpClient`
//! - `RestTransport`, the HTTP implementation of `forcelink_core::Transport`
//! - Configuration loading from environment and files
//! - Logging bootstrap
//!
//! ## Architecture
//! - Implements traits defined in `forcelink-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

use std::sync::Arc;

use forcelink_core::{SObjectService, Transport};
use forcelink_domain::{ForceConfig, Result};

// Re-export commonly used items
pub use api::{AccessTokenProvider, ApiError, RestTransport, RestTransportConfig, StaticTokenProvider};
pub use errors::InfraError;
pub use http::HttpClient;

/// Build an [`SObjectService`] talking to the org described by `config`.
///
/// The schema registry is populated lazily on first use; call
/// [`SObjectService::warm_up`] to do it eagerly.
///
/// # Errors
/// Returns `ForceError::Config` if the config is invalid or the transport
/// cannot be created.
pub fn connect(config: &ForceConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<SObjectService> {
    config.validate()?;
    let transport = RestTransport::new(RestTransportConfig::from(config), auth)?;
    tracing::debug!(instance_url = %transport.instance_url(), api_version = %config.api_version, "Connecting");
    SObjectService::from_config(Arc::new(transport) as Arc<dyn Transport>, config)
}
