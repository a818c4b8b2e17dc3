//! Lazily populated schema registry with a read-through describe cache
//!
//! # Lifecycle
//!
//! - **Empty** at construction (unless built with [`SchemaRegistry::with_metadata`])
//! - **Populated** on first access or an explicit [`SchemaRegistry::load`],
//!   with a single discovery request even under concurrent first access
//! - **Read-mostly** afterwards; the type map is never mutated again
//!
//! Descriptions are memoised per type name for the lifetime of the registry.
//! Concurrent misses on the same name share one describe request.

use std::collections::HashMap;
use std::sync::Arc;

use forcelink_domain::constants::{DESCRIBE_URL_KEY, ID_PLACEHOLDER, ROW_TEMPLATE_URL_KEY, SOBJECT_URL_KEY};
use forcelink_domain::{ForceError, Result, SObjectDescription, SObjectMetaData, SObjectsListing};
use moka::future::Cache;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::ports::{decode, Transport};

/// Type name → metadata map shared with callers.
pub type SObjectMap = HashMap<String, SObjectMetaData>;

/// Schema registry backed by the discovery and describe endpoints.
pub struct SchemaRegistry {
    transport: Arc<dyn Transport>,
    api_version: String,
    sobjects: OnceCell<Arc<SObjectMap>>,
    descriptions: Cache<String, Arc<SObjectDescription>>,
}

impl SchemaRegistry {
    /// Create an empty registry that discovers types on first use.
    pub fn new(transport: Arc<dyn Transport>, api_version: impl Into<String>) -> Self {
        Self {
            transport,
            api_version: api_version.into(),
            sobjects: OnceCell::new(),
            descriptions: Cache::builder().build(),
        }
    }

    /// Create a registry that is already populated with `metadata`.
    ///
    /// No discovery request is ever issued by such a registry.
    pub fn with_metadata(
        transport: Arc<dyn Transport>,
        api_version: impl Into<String>,
        metadata: impl IntoIterator<Item = SObjectMetaData>,
    ) -> Self {
        let map: SObjectMap = metadata.into_iter().map(|m| (m.name.clone(), m)).collect();
        Self {
            transport,
            api_version: api_version.into(),
            sobjects: OnceCell::new_with(Some(Arc::new(map))),
            descriptions: Cache::builder().build(),
        }
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Whether the type map has been populated.
    pub fn is_loaded(&self) -> bool {
        self.sobjects.initialized()
    }

    /// Populate the type map if needed and return the number of known types.
    ///
    /// # Errors
    /// Propagates transport and decode errors from the discovery request.
    pub async fn load(&self) -> Result<usize> {
        Ok(self.sobjects().await?.len())
    }

    /// Full type map, populating it on first call.
    ///
    /// # Errors
    /// Propagates transport and decode errors from the discovery request.
    /// A failed discovery leaves the registry empty so a later call retries.
    pub async fn sobjects(&self) -> Result<Arc<SObjectMap>> {
        self.sobjects.get_or_try_init(|| self.discover()).await.map(Arc::clone)
    }

    #[instrument(skip(self), fields(api_version = %self.api_version))]
    async fn discover(&self) -> Result<Arc<SObjectMap>> {
        let uri = format!("/services/data/{}/sobjects", self.api_version);
        debug!(uri = %uri, "Discovering sobject types");

        let listing: SObjectsListing = decode(self.transport.get(&uri, &[]).await?)?;
        let map: SObjectMap = listing.sobjects.into_iter().map(|m| (m.name.clone(), m)).collect();

        info!(types = map.len(), "Schema registry populated");
        Ok(Arc::new(map))
    }

    /// Metadata for one type.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` if the type is not registered.
    pub async fn metadata(&self, api_name: &str) -> Result<SObjectMetaData> {
        self.sobjects()
            .await?
            .get(api_name)
            .cloned()
            .ok_or_else(|| ForceError::TypeNotFound(api_name.to_string()))
    }

    /// URL template `key` of `api_name`.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unknown types, `ForceError::Internal` if
    /// the type has no such URL.
    pub async fn url(&self, api_name: &str, key: &str) -> Result<String> {
        let metadata = self.metadata(api_name).await?;
        metadata.url(key).map(str::to_string).ok_or_else(|| {
            ForceError::Internal(format!("SObject {api_name} has no '{key}' URL"))
        })
    }

    /// Row URL of record `id` (the `rowTemplate` with its id substituted).
    ///
    /// # Errors
    /// Same as [`SchemaRegistry::url`].
    pub async fn row_url(&self, api_name: &str, id: &str) -> Result<String> {
        Ok(self.url(api_name, ROW_TEMPLATE_URL_KEY).await?.replacen(ID_PLACEHOLDER, id, 1))
    }

    /// `<sobject url>/<external id field>/<id>`.
    ///
    /// # Errors
    /// Same as [`SchemaRegistry::url`].
    pub async fn external_id_url(&self, api_name: &str, external_field: &str, id: &str) -> Result<String> {
        let base = self.url(api_name, SOBJECT_URL_KEY).await?;
        Ok(format!("{base}/{external_field}/{id}"))
    }

    /// Describe `api_name`, serving repeated calls from the cache.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unknown types, or the describe
    /// request's transport/decode error. Failures are not cached.
    pub async fn describe(&self, api_name: &str) -> Result<Arc<SObjectDescription>> {
        self.descriptions
            .try_get_with(api_name.to_string(), self.fetch_description(api_name))
            .await
            .map_err(|err| (*err).clone())
    }

    /// Cached description, without fetching.
    pub async fn cached_description(&self, api_name: &str) -> Option<Arc<SObjectDescription>> {
        self.descriptions.get(api_name).await
    }

    #[instrument(skip(self))]
    async fn fetch_description(&self, api_name: &str) -> Result<Arc<SObjectDescription>> {
        let uri = self.url(api_name, DESCRIBE_URL_KEY).await?;
        debug!(uri = %uri, "Describe cache miss");

        let mut description: SObjectDescription = decode(self.transport.get(&uri, &[]).await?)?;
        description.compute_all_fields();

        debug!(fields = description.fields.len(), "Describe cached");
        Ok(Arc::new(description))
    }
}
