//! REST transport for the SObject API
//!
//! Implements the core [`Transport`] port over HTTPS with bearer
//! authentication. Paths are resolved against the instance URL; absolute
//! URLs are used as-is.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use forcelink_core::{QueryParams, Transport};
use forcelink_domain::constants::DEFAULT_TIMEOUT_SECS;
use forcelink_domain::{ForceConfig, ForceError, Result as DomainResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Configuration for the REST transport
#[derive(Debug, Clone)]
pub struct RestTransportConfig {
    /// Org instance URL (e.g., "https://example.my.salesforce.com")
    pub instance_url: String,
    /// Timeout for each request
    pub timeout: Duration,
    pub user_agent: Option<String>,
    /// Bypass system proxy settings
    pub no_proxy: bool,
}

impl Default for RestTransportConfig {
    fn default() -> Self {
        Self {
            instance_url: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            no_proxy: false,
        }
    }
}

impl From<&ForceConfig> for RestTransportConfig {
    fn from(config: &ForceConfig) -> Self {
        Self {
            instance_url: config.instance_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
            no_proxy: config.no_proxy,
        }
    }
}

/// `Transport` implementation backed by [`HttpClient`].
pub struct RestTransport {
    http_client: Arc<HttpClient>,
    auth: Arc<dyn AccessTokenProvider>,
    config: RestTransportConfig,
    base_url: String,
}

impl RestTransport {
    /// Create a new transport
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the instance URL is not an absolute
    /// http(s) URL or the HTTP client cannot be created
    pub fn new(
        config: RestTransportConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let base_url = Self::base_url(&config.instance_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = HttpClient::builder().timeout(config.timeout).default_headers(headers);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client: Arc::new(http_client), auth, config, base_url })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::default()
    }

    pub fn instance_url(&self) -> &str {
        &self.base_url
    }

    fn base_url(instance_url: &str) -> Result<String, ApiError> {
        if instance_url.trim().is_empty() {
            return Err(ApiError::Config("instance URL not set".to_string()));
        }
        let parsed = Url::parse(instance_url)
            .map_err(|e| ApiError::from(ForceError::from(InfraError::from(e))))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!("unsupported URL scheme: {}", parsed.scheme())));
        }
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send one request and decode its JSON body.
    ///
    /// 204/205 and empty bodies decode to `Value::Null`.
    #[instrument(skip(self, params, body), fields(method = %method, path = %path))]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(path);
        debug!(url = %url, "REST request");

        let token = self.auth.access_token().await?;
        let mut request = self.http_client.request(method, &url).bearer_auth(token);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let timeout = self.config.timeout;
        let response = match tokio::time::timeout(timeout, self.http_client.send(request)).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => return Err(ApiError::Timeout(timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, &url, body));
        }

        // 204/205 carry no body
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            debug!(status = %status, "REST request successful, no content");
            return Ok(Value::Null);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from(ForceError::from(InfraError::from(e))))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value = serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response from {url}: {e}")))?;
        debug!(status = %status, "REST request successful");
        Ok(value)
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimit(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn get(&self, path: &str, params: &QueryParams) -> DomainResult<Value> {
        Ok(self.execute(Method::GET, path, params, None).await?)
    }

    async fn post(&self, path: &str, params: &QueryParams, body: Value) -> DomainResult<Value> {
        Ok(self.execute(Method::POST, path, params, Some(body)).await?)
    }

    async fn patch(&self, path: &str, params: &QueryParams, body: Value) -> DomainResult<Value> {
        Ok(self.execute(Method::PATCH, path, params, Some(body)).await?)
    }

    async fn delete(&self, path: &str, params: &QueryParams) -> DomainResult<()> {
        self.execute(Method::DELETE, path, params, None).await?;
        Ok(())
    }

    async fn delete_with_response(&self, path: &str, params: &QueryParams) -> DomainResult<Value> {
        Ok(self.execute(Method::DELETE, path, params, None).await?)
    }
}

/// Builder for [`RestTransport`]
#[derive(Default)]
pub struct RestTransportBuilder {
    config: Option<RestTransportConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl RestTransportBuilder {
    /// Set the transport configuration
    #[must_use]
    pub fn config(mut self, config: RestTransportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authentication provider
    #[must_use]
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the transport
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<RestTransport, ApiError> {
        let config = self.config.unwrap_or_default();
        let auth =
            self.auth.ok_or_else(|| ApiError::Config("Auth provider not set".to_string()))?;

        RestTransport::new(config, auth)
    }
}
