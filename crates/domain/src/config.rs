//! Client configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS, SOBJECT_CREATE_BATCH_SIZE,
    SOBJECT_DELETE_BATCH_SIZE, SOBJECT_UPDATE_BATCH_SIZE,
};
use crate::{ForceError, Result};

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceConfig {
    /// Org instance URL (e.g., "https://example.my.salesforce.com")
    pub instance_url: String,
    /// REST API version including the leading `v` (e.g., "v45.0")
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub batch_limits: BatchLimits,
    /// Ignore `HTTPS_PROXY` and friends and connect directly
    #[serde(default)]
    pub no_proxy: bool,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ForceConfig {
    /// Config pointing at `instance_url` with every other field defaulted.
    pub fn new(instance_url: impl Into<String>) -> Self {
        Self {
            instance_url: instance_url.into(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            batch_limits: BatchLimits::default(),
            no_proxy: false,
        }
    }

    /// Check the config for values the client cannot work with.
    ///
    /// # Errors
    /// Returns `ForceError::Config` on an empty instance URL, a malformed API
    /// version, a zero timeout or a zero batch limit.
    pub fn validate(&self) -> Result<()> {
        if self.instance_url.trim().is_empty() {
            return Err(ForceError::Config("instance_url must not be empty".into()));
        }
        if !is_api_version(&self.api_version) {
            return Err(ForceError::Config(format!(
                "api_version must look like v45.0, got {:?}",
                self.api_version
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ForceError::Config("timeout_secs must be greater than zero".into()));
        }
        self.batch_limits.validate()
    }
}

fn is_api_version(version: &str) -> bool {
    let Some(rest) = version.strip_prefix('v') else {
        return false;
    };
    let mut parts = rest.splitn(2, '.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    !major.is_empty()
        && !minor.is_empty()
        && major.chars().all(|c| c.is_ascii_digit())
        && minor.chars().all(|c| c.is_ascii_digit())
}

/// Maximum records (or ids) per bulk request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchLimits {
    pub insert: usize,
    pub update: usize,
    pub delete: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            insert: SOBJECT_CREATE_BATCH_SIZE,
            update: SOBJECT_UPDATE_BATCH_SIZE,
            delete: SOBJECT_DELETE_BATCH_SIZE,
        }
    }
}

impl BatchLimits {
    /// Same limit for all three operations.
    pub fn uniform(size: usize) -> Self {
        Self { insert: size, update: size, delete: size }
    }

    /// # Errors
    /// Returns `ForceError::Config` if any limit is zero or above the
    /// server's per-request ceiling.
    pub fn validate(&self) -> Result<()> {
        for (name, value, ceiling) in [
            ("insert", self.insert, SOBJECT_CREATE_BATCH_SIZE),
            ("update", self.update, SOBJECT_UPDATE_BATCH_SIZE),
            ("delete", self.delete, SOBJECT_DELETE_BATCH_SIZE),
        ] {
            if value == 0 {
                return Err(ForceError::Config(format!("{name} batch limit must be greater than zero")));
            }
            if value > ceiling {
                return Err(ForceError::Config(format!(
                    "{name} batch limit {value} exceeds the server ceiling of {ceiling}"
                )));
            }
        }
        Ok(())
    }
}
