//! SObject service: bulk drivers, single-record operations and describe
//!
//! The service owns no per-call state. The only state shared between calls
//! is the [`SchemaRegistry`], which is safe to use from concurrent tasks.

mod bulk;
mod records;

use std::sync::Arc;

use forcelink_domain::{BatchLimits, ForceConfig, ForceError, Result, SObject, SObjectDescription};
use tracing::debug;

use crate::ports::Transport;
use crate::schema::{SObjectMap, SchemaRegistry};

/// Entry point for SObject operations over a [`Transport`].
pub struct SObjectService {
    transport: Arc<dyn Transport>,
    registry: Arc<SchemaRegistry>,
    limits: BatchLimits,
}

impl SObjectService {
    /// Create a service whose registry is discovered on first use.
    pub fn new(transport: Arc<dyn Transport>, api_version: impl Into<String>) -> Self {
        let registry = Arc::new(SchemaRegistry::new(Arc::clone(&transport), api_version));
        Self::with_registry(transport, registry)
    }

    /// Create a service sharing an existing registry.
    pub fn with_registry(transport: Arc<dyn Transport>, registry: Arc<SchemaRegistry>) -> Self {
        Self { transport, registry, limits: BatchLimits::default() }
    }

    /// Create a service from a validated config.
    ///
    /// # Errors
    /// Returns `ForceError::Config` if the config is invalid.
    pub fn from_config(transport: Arc<dyn Transport>, config: &ForceConfig) -> Result<Self> {
        config.validate()?;
        Self::new(transport, config.api_version.clone()).with_batch_limits(config.batch_limits)
    }

    /// Override the per-request batch sizes.
    ///
    /// # Errors
    /// Returns `ForceError::Config` if a limit is zero or above the server's
    /// per-request ceiling.
    pub fn with_batch_limits(mut self, limits: BatchLimits) -> Result<Self> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    pub fn batch_limits(&self) -> BatchLimits {
        self.limits
    }

    pub fn api_version(&self) -> &str {
        self.registry.api_version()
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Populate the schema registry ahead of the first operation.
    ///
    /// # Errors
    /// Propagates the discovery request's error.
    pub async fn warm_up(&self) -> Result<usize> {
        let count = self.registry.load().await?;
        debug!(types = count, "Schema registry warmed up");
        Ok(count)
    }

    /// Every known type, populating the registry if it was never loaded.
    ///
    /// # Errors
    /// Propagates the discovery request's error.
    pub async fn describe_sobjects(&self) -> Result<Arc<SObjectMap>> {
        self.registry.sobjects().await
    }

    /// Describe the type of `record`, cached for the life of the service.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unregistered types, or the describe
    /// request's error.
    pub async fn describe_sobject<T: SObject + ?Sized>(&self, record: &T) -> Result<Arc<SObjectDescription>> {
        self.registry.describe(record.api_name()).await
    }

    fn collection_uri(&self) -> String {
        format!("/services/data/{}/composite/sobjects", self.api_version())
    }

    fn tree_uri(&self, api_name: &str) -> String {
        format!("/services/data/{}/composite/tree/{}", self.api_version(), api_name)
    }
}

/// Wrap a transport error raised while sending batch `batch`.
fn batch_transport(call: &'static str, batch: usize) -> impl FnOnce(ForceError) -> ForceError {
    move |source| ForceError::BatchTransport { call: call.to_string(), batch, source: Box::new(source) }
}
